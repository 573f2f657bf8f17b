//! BitPlane - One 8x8 bit-plane packed into a single 64-bit word.
//!
//! A bit-plane is the set of bits at one significance position across all
//! 64 pixels of a tile. Since 8 x 8 = 64 the whole plane fits one machine
//! word, so reads, writes and the Gray-code XOR cascade are single
//! instructions.
//!
//! # Design
//!
//! - Storage: `u64`, LSB-first
//! - Bit indexing: `bit_idx = rx * 8 + ry` for intra-block coordinate `(rx, ry)`
//!
//! # Examples
//!
//! ```
//! use bpcs_planes::BitPlane;
//!
//! let mut plane = BitPlane::new();
//! plane.set(0, 1, true)?;
//! plane.set(1, 0, true)?;
//! assert_eq!(plane.count_ones(), 2);
//! assert_eq!(plane.acts(), vec![1, 8]);
//! assert!(plane.set(3, 9, true).is_err());
//! # Ok::<(), bpcs_planes::BpcsError>(())
//! ```

use crate::error::{BpcsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitXor, BitXorAssign};

/// Side length of a block / bit-plane in pixels
pub const BLOCK_SIDE: usize = 8;

/// Number of bits in one bit-plane
pub const BITS_PER_PLANE: usize = BLOCK_SIDE * BLOCK_SIDE;

/// Get bit index within the plane word from an intra-block coordinate
#[inline(always)]
pub(crate) const fn plane_bit_idx(rx: usize, ry: usize) -> usize {
    rx * BLOCK_SIDE + ry
}

/// Reject intra-block coordinates outside `[0, 8) x [0, 8)`.
#[inline]
pub(crate) fn check_intra(rx: usize, ry: usize) -> Result<()> {
    if rx >= BLOCK_SIDE || ry >= BLOCK_SIDE {
        return Err(BpcsError::IntraBlockOutOfRange {
            rx,
            ry,
            side: BLOCK_SIDE,
        });
    }
    Ok(())
}

/// One 8x8 bit-plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitPlane(u64);

impl BitPlane {
    /// Create an all-zero plane.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Wrap a raw plane word.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw plane word.
    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Get the bit at `(rx, ry)`.
    pub fn get(self, rx: usize, ry: usize) -> Result<bool> {
        check_intra(rx, ry)?;
        Ok(self.bit(plane_bit_idx(rx, ry)))
    }

    /// Assign the bit at `(rx, ry)`.
    pub fn set(&mut self, rx: usize, ry: usize, val: bool) -> Result<()> {
        check_intra(rx, ry)?;
        self.assign_bit(plane_bit_idx(rx, ry), val);
        Ok(())
    }

    /// Bit at raw index `bit_idx`; caller guarantees `bit_idx < 64`.
    #[inline(always)]
    pub(crate) fn bit(self, bit_idx: usize) -> bool {
        (self.0 >> bit_idx) & 1 == 1
    }

    /// Assign the bit at raw index `bit_idx`; caller guarantees `bit_idx < 64`.
    #[inline(always)]
    pub(crate) fn assign_bit(&mut self, bit_idx: usize, val: bool) {
        let mask = 1u64 << bit_idx;
        if val {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Count set bits (population count).
    #[inline]
    pub fn count_ones(self) -> u32 {
        self.0.count_ones()
    }

    /// True if no bit is set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get indices of all set bits, ascending.
    pub fn acts(self) -> Vec<usize> {
        let mut acts = Vec::with_capacity(self.count_ones() as usize);
        let mut word = self.0;
        while word != 0 {
            acts.push(word.trailing_zeros() as usize);
            word &= word - 1;
        }
        acts
    }
}

impl From<u64> for BitPlane {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl From<BitPlane> for u64 {
    fn from(plane: BitPlane) -> Self {
        plane.0
    }
}

impl BitXor for BitPlane {
    type Output = BitPlane;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for BitPlane {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

/// Renders the set-bit indices, e.g. `{0, 9, 63}`.
impl fmt::Display for BitPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, act) in self.acts().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", act)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let plane = BitPlane::new();
        assert_eq!(plane.bits(), 0);
        assert!(plane.is_empty());
        assert_eq!(plane, BitPlane::default());
    }

    #[test]
    fn test_set_get() {
        let mut plane = BitPlane::new();
        assert!(!plane.get(3, 5).unwrap());
        plane.set(3, 5, true).unwrap();
        assert!(plane.get(3, 5).unwrap());
        assert_eq!(plane.bits(), 1u64 << 29);
        plane.set(3, 5, false).unwrap();
        assert!(!plane.get(3, 5).unwrap());
    }

    #[test]
    fn test_layout_x_major() {
        let mut plane = BitPlane::new();
        plane.set(0, 7, true).unwrap();
        plane.set(7, 0, true).unwrap();
        assert_eq!(plane.acts(), vec![7, 56]);
    }

    #[test]
    fn test_corners() {
        let mut plane = BitPlane::new();
        plane.set(0, 0, true).unwrap();
        plane.set(7, 7, true).unwrap();
        assert_eq!(plane.bits(), 1 | (1u64 << 63));
        assert_eq!(plane.count_ones(), 2);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut plane = BitPlane::new();
        assert!(matches!(
            plane.set(3, 9, true),
            Err(BpcsError::IntraBlockOutOfRange { rx: 3, ry: 9, side: 8 })
        ));
        assert!(plane.set(8, 0, true).is_err());
        assert!(plane.is_empty());
        assert!(!plane.get(4, 1).unwrap());

        assert!(plane.get(0, 8).is_err());
        assert!(plane.get(8, 0).is_err());
    }

    #[test]
    fn test_xor() {
        let a = BitPlane::from_bits(0b1100);
        let b = BitPlane::from_bits(0b1010);
        assert_eq!((a ^ b).bits(), 0b0110);

        let mut c = a;
        c ^= b;
        c ^= b;
        assert_eq!(c, a);
    }

    #[test]
    fn test_display() {
        assert_eq!(BitPlane::new().to_string(), "{}");
        assert_eq!(BitPlane::from_bits(0b101).to_string(), "{0, 2}");
        assert_eq!(BitPlane::from_bits(u64::MAX).acts().len(), 64);
    }
}
