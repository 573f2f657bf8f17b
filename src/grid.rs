//! Grid - The image as a flat arena of bit-plane blocks.
//!
//! The requested extent is truncated on each axis to the largest multiple
//! of 8 strictly below the request, so a 9x19 image becomes an 8x16 grid
//! of 1x2 blocks. The dropped margin is never represented here; passing it
//! through unchanged is the image I/O layer's job.
//!
//! Blocks live in one `Vec` indexed by `block_y * block_width + block_x`,
//! sized once at construction.
//!
//! # Coordinates
//!
//! - Absolute pixel `(x, y)`: `0 <= x < width`, `0 <= y < height`
//! - Block `(block_x, block_y)`: `(x / 8, y / 8)`
//! - Intra-block `(rx, ry)`: `(x % 8, y % 8)`
//!
//! # Examples
//!
//! ```
//! use bpcs_planes::{Coding, Grid};
//!
//! let mut grid = Grid::new(9, 19)?;
//! assert_eq!((grid.block_width(), grid.block_height()), (1, 2));
//!
//! grid.set_color(3, 12, 0xFF80_4020)?;
//! grid.to_cgc();
//! assert_eq!(grid.coding(), Coding::Cgc);
//! grid.to_pbc();
//! assert_eq!(grid.get_color(3, 12)?, 0xFF80_4020);
//! # Ok::<(), bpcs_planes::BpcsError>(())
//! ```

use crate::bitplane::{BitPlane, BLOCK_SIDE};
use crate::block::PlaneBlock;
use crate::codec::PLANE_DEPTH;
use crate::config::{GridConfig, GridSnapshot};
use crate::error::{BpcsError, Result};
use crate::transform::Coding;
use itertools::iproduct;
use std::fmt;
use tracing::{debug, trace};

/// Largest effective pixel count a grid will allocate (16384 x 16384).
pub const MAX_PIXELS: usize = 1 << 28;

/// Largest multiple of the block side strictly below `requested`.
#[inline]
fn effective_extent(requested: usize) -> usize {
    (requested - 1) / BLOCK_SIDE * BLOCK_SIDE
}

/// Truncated extent of a requested image, before anything is allocated.
struct Layout {
    width: usize,
    height: usize,
    block_width: usize,
    block_height: usize,
}

impl Layout {
    fn new(width: usize, height: usize) -> Result<Self> {
        if width <= BLOCK_SIDE || height <= BLOCK_SIDE {
            return Err(BpcsError::ImageTooSmall {
                width,
                height,
                side: BLOCK_SIDE,
            });
        }

        let eff_width = effective_extent(width);
        let eff_height = effective_extent(height);
        eff_width
            .checked_mul(eff_height)
            .filter(|&pixels| pixels <= MAX_PIXELS)
            .ok_or(BpcsError::ImageTooLarge {
                width,
                height,
                max_pixels: MAX_PIXELS,
            })?;

        Ok(Self {
            width: eff_width,
            height: eff_height,
            block_width: eff_width / BLOCK_SIDE,
            block_height: eff_height / BLOCK_SIDE,
        })
    }

    #[inline]
    fn num_blocks(&self) -> usize {
        self.block_width * self.block_height
    }
}

/// Bit-plane view of an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    config: GridConfig,
    width: usize,
    height: usize,
    block_width: usize,
    block_height: usize,
    blocks: Vec<PlaneBlock>,
    coding: Coding,
}

impl Grid {
    /// Create a zeroed grid for a `width` x `height` image.
    ///
    /// Both sides must exceed 8 and the truncated extent may hold at most
    /// [`MAX_PIXELS`] pixels.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let layout = Layout::new(width, height)?;

        debug!(
            width,
            height,
            eff_width = layout.width,
            eff_height = layout.height,
            block_width = layout.block_width,
            block_height = layout.block_height,
            "created bit-plane grid"
        );

        Ok(Self {
            config: GridConfig::new(width, height),
            width: layout.width,
            height: layout.height,
            block_width: layout.block_width,
            block_height: layout.block_height,
            blocks: vec![PlaneBlock::new(); layout.num_blocks()],
            coding: Coding::Pbc,
        })
    }

    /// Create a zeroed grid from a stored configuration.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(config.width, config.height)
    }

    /// The requested (untruncated) dimensions this grid was built from.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Effective width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Effective height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width in blocks.
    #[inline]
    pub fn block_width(&self) -> usize {
        self.block_width
    }

    /// Height in blocks.
    #[inline]
    pub fn block_height(&self) -> usize {
        self.block_height
    }

    /// Current coding of the stored planes.
    #[inline]
    pub fn coding(&self) -> Coding {
        self.coding
    }

    /// True iff `(x, y)` lies inside the effective extent.
    #[inline]
    pub fn in_range(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    fn pixel_index(&self, x: usize, y: usize) -> Result<(usize, usize, usize)> {
        if !self.in_range(x, y) {
            return Err(BpcsError::PixelOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = (y / BLOCK_SIDE) * self.block_width + x / BLOCK_SIDE;
        Ok((idx, x % BLOCK_SIDE, y % BLOCK_SIDE))
    }

    fn block_index(&self, block_x: usize, block_y: usize) -> Result<usize> {
        if block_x >= self.block_width || block_y >= self.block_height {
            return Err(BpcsError::BlockOutOfRange {
                block_x,
                block_y,
                block_width: self.block_width,
                block_height: self.block_height,
            });
        }
        Ok(block_y * self.block_width + block_x)
    }

    /// Write a packed color at absolute `(x, y)`.
    pub fn set_color(&mut self, x: usize, y: usize, color: u32) -> Result<()> {
        let (idx, rx, ry) = self.pixel_index(x, y)?;
        self.blocks[idx].set_color(rx, ry, color)
    }

    /// Write a color given as a wider integer, rejecting anything outside
    /// `[0, 2^32)`.
    pub fn set_color_checked(&mut self, x: usize, y: usize, color: i64) -> Result<()> {
        let color = u32::try_from(color).map_err(|_| BpcsError::ColorOutOfRange(color))?;
        self.set_color(x, y, color)
    }

    /// Read the packed color at absolute `(x, y)`.
    pub fn get_color(&self, x: usize, y: usize) -> Result<u32> {
        let (idx, rx, ry) = self.pixel_index(x, y)?;
        self.blocks[idx].get_color(rx, ry)
    }

    /// Plane `depth` of block `(block_x, block_y)`.
    pub fn bit_plane(&self, block_x: usize, block_y: usize, depth: usize) -> Result<BitPlane> {
        let idx = self.block_index(block_x, block_y)?;
        self.blocks[idx].bit_plane(depth)
    }

    /// Replace plane `depth` of block `(block_x, block_y)`.
    pub fn set_bit_plane(
        &mut self,
        block_x: usize,
        block_y: usize,
        depth: usize,
        plane: BitPlane,
    ) -> Result<()> {
        let idx = self.block_index(block_x, block_y)?;
        self.blocks[idx].set_bit_plane(depth, plane)
    }

    /// Block at `(block_x, block_y)`.
    pub fn block(&self, block_x: usize, block_y: usize) -> Result<&PlaneBlock> {
        let idx = self.block_index(block_x, block_y)?;
        Ok(&self.blocks[idx])
    }

    /// Mutable block at `(block_x, block_y)`.
    pub fn block_mut(&mut self, block_x: usize, block_y: usize) -> Result<&mut PlaneBlock> {
        let idx = self.block_index(block_x, block_y)?;
        Ok(&mut self.blocks[idx])
    }

    /// Iterate blocks as `((block_x, block_y), block)`, `block_x` outermost.
    pub fn blocks(&self) -> impl Iterator<Item = ((usize, usize), &PlaneBlock)> + '_ {
        iproduct!(0..self.block_width, 0..self.block_height)
            .map(move |(bx, by)| ((bx, by), &self.blocks[by * self.block_width + bx]))
    }

    /// Convert every block from pure binary to canonical Gray code.
    ///
    /// Not idempotent: applying it to an already Gray-coded grid XORs again.
    pub fn to_cgc(&mut self) {
        trace!(from = %self.coding, blocks = self.blocks.len(), "converting grid to CGC");
        self.blocks.iter_mut().for_each(PlaneBlock::to_cgc);
        self.coding = Coding::Cgc;
    }

    /// Convert every block from canonical Gray code back to pure binary.
    pub fn to_pbc(&mut self) {
        trace!(from = %self.coding, blocks = self.blocks.len(), "converting grid to PBC");
        self.blocks.iter_mut().for_each(PlaneBlock::to_pbc);
        self.coding = Coding::Pbc;
    }

    /// Capture the whole grid for persistence.
    pub fn to_snapshot(&self) -> GridSnapshot {
        let planes = self
            .blocks
            .iter()
            .flat_map(|block| block.planes().iter().map(|p| p.bits()))
            .collect();
        GridSnapshot {
            config: self.config,
            coding: self.coding,
            planes,
        }
    }

    /// Restore a grid captured with [`Grid::to_snapshot`].
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self> {
        let layout = Layout::new(snapshot.config.width, snapshot.config.height)?;
        let expected = layout.num_blocks() * PLANE_DEPTH;
        if snapshot.planes.len() != expected {
            return Err(BpcsError::DimensionMismatch {
                expected,
                actual: snapshot.planes.len(),
            });
        }

        let mut grid = Self::from_config(&snapshot.config)?;

        for (block, words) in grid
            .blocks
            .iter_mut()
            .zip(snapshot.planes.chunks_exact(PLANE_DEPTH))
        {
            let mut planes = [BitPlane::new(); PLANE_DEPTH];
            for (plane, &bits) in planes.iter_mut().zip(words) {
                *plane = BitPlane::from_bits(bits);
            }
            *block = PlaneBlock::from_planes(planes);
        }
        grid.coding = snapshot.coding;

        debug!(
            block_width = grid.block_width,
            block_height = grid.block_height,
            coding = %grid.coding,
            "restored grid from snapshot"
        );
        Ok(grid)
    }
}

/// Debug dump: one `bx, by, depth: {set bits}` line per plane.
///
/// Not a stable serialization format; use [`GridSnapshot`] for that.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ((bx, by), block) in self.blocks() {
            for (depth, plane) in block.planes().iter().enumerate() {
                writeln!(f, "{}, {}, {}: {}", bx, by, depth, plane)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_extent() {
        assert_eq!(effective_extent(9), 8);
        assert_eq!(effective_extent(16), 8);
        assert_eq!(effective_extent(17), 16);
        assert_eq!(effective_extent(19), 16);
        assert_eq!(effective_extent(25), 24);
    }

    #[test]
    fn test_new_truncates() {
        let grid = Grid::new(9, 19).unwrap();
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 16);
        assert_eq!(grid.block_width(), 1);
        assert_eq!(grid.block_height(), 2);
        assert_eq!(grid.blocks.len(), 2);
        assert_eq!(grid.config(), &GridConfig::new(9, 19));
    }

    #[test]
    fn test_aligned_request_drops_last_tile() {
        let grid = Grid::new(16, 32).unwrap();
        assert_eq!((grid.width(), grid.height()), (8, 24));
    }

    #[test]
    fn test_too_small() {
        assert!(matches!(
            Grid::new(8, 100),
            Err(BpcsError::ImageTooSmall { width: 8, .. })
        ));
        assert!(Grid::new(100, 8).is_err());
        assert!(Grid::new(0, 0).is_err());
    }

    #[test]
    fn test_too_large() {
        assert!(matches!(
            Grid::new(1 << 40, 1 << 40),
            Err(BpcsError::ImageTooLarge { max_pixels: MAX_PIXELS, .. })
        ));
        assert!(matches!(
            Grid::new(usize::MAX, usize::MAX),
            Err(BpcsError::ImageTooLarge { .. })
        ));
        // 16384 x 16384 effective is the cap; one more tile row is rejected
        assert!(Layout::new(16385, 16385).is_ok());
        assert!(matches!(
            Layout::new(16385, 16393),
            Err(BpcsError::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn test_block_addressing() {
        let mut grid = Grid::new(25, 17).unwrap();
        assert_eq!((grid.block_width(), grid.block_height()), (3, 2));

        grid.set_color(19, 9, 0xFFFF_FFFF).unwrap();
        // (19, 9) -> block (2, 1), intra (3, 1)
        let block = grid.block(2, 1).unwrap();
        assert_eq!(block.get_color(3, 1).unwrap(), 0xFFFF_FFFF);
        assert_eq!(grid.blocks[5], *block);
    }

    #[test]
    fn test_blocks_order() {
        let grid = Grid::new(17, 25).unwrap();
        let coords: Vec<_> = grid.blocks().map(|(c, _)| c).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_set_color_checked() {
        let mut grid = Grid::new(9, 9).unwrap();
        grid.set_color_checked(0, 0, 0xFFFF_FFFF).unwrap();
        assert_eq!(grid.get_color(0, 0).unwrap(), u32::MAX);

        assert!(matches!(
            grid.set_color_checked(0, 1, 1 << 32),
            Err(BpcsError::ColorOutOfRange(_))
        ));
        assert!(matches!(
            grid.set_color_checked(0, 1, -1),
            Err(BpcsError::ColorOutOfRange(-1))
        ));
        assert_eq!(grid.get_color(0, 1).unwrap(), 0);
    }

    #[test]
    fn test_coding_tracks_transforms() {
        let mut grid = Grid::new(9, 9).unwrap();
        assert_eq!(grid.coding(), Coding::Pbc);
        grid.to_cgc();
        assert_eq!(grid.coding(), Coding::Cgc);
        grid.to_pbc();
        assert_eq!(grid.coding(), Coding::Pbc);
    }

    #[test]
    fn test_display_dump() {
        let mut grid = Grid::new(9, 17).unwrap();
        grid.set_color(0, 8, 0b11).unwrap();

        let dump = grid.to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2 * PLANE_DEPTH);
        assert_eq!(lines[0], "0, 0, 0: {}");
        assert_eq!(lines[PLANE_DEPTH], "0, 1, 0: {0}");
        assert_eq!(lines[PLANE_DEPTH + 1], "0, 1, 1: {0}");
        assert_eq!(lines[2 * PLANE_DEPTH - 1], "0, 1, 31: {}");
    }
}
