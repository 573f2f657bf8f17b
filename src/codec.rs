//! Fixed mapping between channel-packed colors and bit-plane depths.
//!
//! A pixel is a 4-channel, 8-bit-per-channel value packed into a `u32`.
//! Plane depth `d` holds bit `d % 8` of channel `d / 8`, least significant
//! first:
//!
//! | depths | channel |
//! |--------|---------|
//! | 0-7    | blue    |
//! | 8-15   | green   |
//! | 16-23  | red     |
//! | 24-31  | alpha   |
//!
//! Any analysis layer built on top of [`Grid`](crate::Grid) depends on this
//! mapping verbatim; it is not configurable.

use crate::bitplane::BitPlane;
use crate::error::{BpcsError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Bits stored per color channel
pub const BITS_PER_CHANNEL: usize = 8;

/// Number of color channels per pixel
pub const NUM_CHANNELS: usize = 4;

/// Number of bit-planes per block (one per color bit)
pub const PLANE_DEPTH: usize = BITS_PER_CHANNEL * NUM_CHANNELS;

/// Color channel, in packing order from the least significant byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Least significant byte, depths 0-7
    Blue = 0,
    /// Depths 8-15
    Green = 1,
    /// Depths 16-23
    Red = 2,
    /// Most significant byte, depths 24-31
    Alpha = 3,
}

impl Channel {
    /// All channels in depth order.
    pub const ALL: [Channel; NUM_CHANNELS] =
        [Channel::Blue, Channel::Green, Channel::Red, Channel::Alpha];

    /// Index of this channel within the packed color (0 = blue).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Depths holding this channel's bits, least significant first.
    #[inline]
    pub const fn depths(self) -> Range<usize> {
        let start = self.index() * BITS_PER_CHANNEL;
        start..start + BITS_PER_CHANNEL
    }

    /// Mask selecting this channel inside a packed color.
    #[inline]
    pub const fn mask(self) -> u32 {
        0xFF << (self.index() * BITS_PER_CHANNEL)
    }

    /// Extract this channel's 8-bit value from a packed color.
    #[inline]
    pub const fn extract(self, color: u32) -> u8 {
        ((color & self.mask()) >> (self.index() * BITS_PER_CHANNEL)) as u8
    }
}

/// Channel stored at `depth`, or `None` if `depth >= 32`.
#[inline]
pub fn channel_of(depth: usize) -> Option<Channel> {
    Channel::ALL.get(depth / BITS_PER_CHANNEL).copied()
}

/// Bit position within its channel for `depth`.
#[inline]
pub const fn bit_in_channel(depth: usize) -> usize {
    depth % BITS_PER_CHANNEL
}

/// Depth holding bit `bit` (0 = LSB) of `channel`.
///
/// Rejects `bit >= 8` with [`BpcsError::ChannelBitOutOfRange`].
#[inline]
pub fn depth_of(channel: Channel, bit: usize) -> Result<usize> {
    if bit >= BITS_PER_CHANNEL {
        return Err(BpcsError::ChannelBitOutOfRange {
            bit,
            max: BITS_PER_CHANNEL,
        });
    }
    Ok(channel.index() * BITS_PER_CHANNEL + bit)
}

/// Scatter the bits of `color` across `planes` at plane bit `bit_idx`.
///
/// Bit `d` of `color` lands in `planes[d]`.
#[inline]
pub(crate) fn scatter(planes: &mut [BitPlane; PLANE_DEPTH], bit_idx: usize, color: u32) {
    for (depth, plane) in planes.iter_mut().enumerate() {
        plane.assign_bit(bit_idx, (color >> depth) & 1 == 1);
    }
}

/// Gather the color at plane bit `bit_idx`, reading planes 31 down to 0.
#[inline]
pub(crate) fn gather(planes: &[BitPlane; PLANE_DEPTH], bit_idx: usize) -> u32 {
    planes
        .iter()
        .rev()
        .fold(0u32, |color, plane| (color << 1) | plane.bit(bit_idx) as u32)
}
