//! Pure binary code (PBC) <-> canonical Gray code (CGC) over bit-planes.
//!
//! BPCS measures complexity on Gray-coded planes: with pure binary, an
//! ordinary carry (e.g. 127 -> 128) flips every bit of a channel and makes
//! smooth regions look noisy. Converting plane-wise is the per-pixel
//! `g = b ^ (b >> 1)` applied to all 32 bits of the packed color at once.
//!
//! Note the cascade crosses channel boundaries: plane 8 (green LSB) is
//! XORed with plane 7 (blue MSB), exactly as the scalar form on the whole
//! `u32` does.

use crate::bitplane::BitPlane;
use crate::codec::PLANE_DEPTH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coding of a grid's bit-planes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coding {
    /// Pure binary code
    #[default]
    Pbc,
    /// Canonical (reflected) Gray code
    Cgc,
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pbc => write!(f, "PBC"),
            Self::Cgc => write!(f, "CGC"),
        }
    }
}

/// Binary to Gray, top-down.
///
/// Plane `d` is XORed with plane `d - 1` while the latter still holds its
/// binary value. Plane 0 is unchanged.
#[inline]
pub(crate) fn planes_to_cgc(planes: &mut [BitPlane; PLANE_DEPTH]) {
    for d in (1..PLANE_DEPTH).rev() {
        let prev = planes[d - 1];
        planes[d] ^= prev;
    }
}

/// Gray to binary, bottom-up.
///
/// Plane `d - 1` has already been restored when plane `d` is visited.
#[inline]
pub(crate) fn planes_to_pbc(planes: &mut [BitPlane; PLANE_DEPTH]) {
    for d in 1..PLANE_DEPTH {
        let prev = planes[d - 1];
        planes[d] ^= prev;
    }
}

/// Scalar binary-to-Gray on a packed color.
///
/// # Examples
///
/// ```
/// use bpcs_planes::transform::{gray_decode, gray_encode};
///
/// assert_eq!(gray_encode(127) ^ gray_encode(128), 1 << 7);
/// assert_eq!(gray_decode(gray_encode(0xCAFE_F00D)), 0xCAFE_F00D);
/// ```
#[inline]
pub const fn gray_encode(value: u32) -> u32 {
    value ^ (value >> 1)
}

/// Scalar Gray-to-binary on a packed color.
#[inline]
pub const fn gray_decode(mut gray: u32) -> u32 {
    let mut shift = 1;
    while shift < 32 {
        gray ^= gray >> shift;
        shift <<= 1;
    }
    gray
}
