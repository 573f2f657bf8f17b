//! PlaneBlock - The 8x8x32 bit cube holding one tile's bit-planes.
//!
//! A block stores every color bit of its 64 pixels as 32 [`BitPlane`]s,
//! one per depth (see [`codec`](crate::codec) for the depth-to-channel map).
//! Blocks are created zero-initialized and only ever live inside a
//! [`Grid`](crate::Grid).
//!
//! # Examples
//!
//! ```
//! use bpcs_planes::PlaneBlock;
//!
//! let mut block = PlaneBlock::new();
//! block.set_color(2, 5, 0xFF00_00AA)?;
//! assert_eq!(block.get_color(2, 5)?, 0xFF00_00AA);
//! assert!(block.bit_plane(31)?.get(2, 5)?);
//! # Ok::<(), bpcs_planes::BpcsError>(())
//! ```

use crate::bitplane::{check_intra, plane_bit_idx, BitPlane};
use crate::codec::{self, PLANE_DEPTH};
use crate::error::{BpcsError, Result};
use crate::transform;
use serde::{Deserialize, Serialize};

/// One tile's 32 bit-planes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneBlock {
    planes: [BitPlane; PLANE_DEPTH],
}

#[inline]
fn check_depth(depth: usize) -> Result<()> {
    if depth >= PLANE_DEPTH {
        return Err(BpcsError::DepthOutOfRange {
            depth,
            max: PLANE_DEPTH,
        });
    }
    Ok(())
}

impl PlaneBlock {
    /// Create a zero-initialized block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a block from 32 planes, depth 0 first.
    pub fn from_planes(planes: [BitPlane; PLANE_DEPTH]) -> Self {
        Self { planes }
    }

    /// Write `color` at `(rx, ry)`: bit `d` of `color` goes to plane `d`.
    pub fn set_color(&mut self, rx: usize, ry: usize, color: u32) -> Result<()> {
        check_intra(rx, ry)?;
        codec::scatter(&mut self.planes, plane_bit_idx(rx, ry), color);
        Ok(())
    }

    /// Read the color at `(rx, ry)`; bit `d` of the result is plane `d`'s bit.
    pub fn get_color(&self, rx: usize, ry: usize) -> Result<u32> {
        check_intra(rx, ry)?;
        Ok(codec::gather(&self.planes, plane_bit_idx(rx, ry)))
    }

    /// Plane at `depth`.
    pub fn bit_plane(&self, depth: usize) -> Result<BitPlane> {
        check_depth(depth)?;
        Ok(self.planes[depth])
    }

    /// Replace the plane at `depth`.
    pub fn set_bit_plane(&mut self, depth: usize, plane: BitPlane) -> Result<()> {
        check_depth(depth)?;
        self.planes[depth] = plane;
        Ok(())
    }

    /// All planes, depth 0 first.
    #[inline]
    pub fn planes(&self) -> &[BitPlane; PLANE_DEPTH] {
        &self.planes
    }

    /// Convert this block's planes from pure binary to canonical Gray code.
    pub fn to_cgc(&mut self) {
        transform::planes_to_cgc(&mut self.planes);
    }

    /// Convert this block's planes from canonical Gray code to pure binary.
    pub fn to_pbc(&mut self) {
        transform::planes_to_pbc(&mut self.planes);
    }
}
