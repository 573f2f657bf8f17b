//! bpcs-planes - Bit-plane layer for BPCS steganography
//!
//! Bit-Plane Complexity Segmentation (BPCS) hides data in the noisy-looking
//! 8x8 regions of individual bit-planes. This crate is the layer underneath:
//! it turns an image's 32-bit channel-packed pixels into a grid of 8x8x32
//! bit-plane blocks and converts those planes between pure binary code (PBC)
//! and canonical Gray code (CGC).
//!
//! Every complexity measure and embedding step built on top depends on the
//! exact bit layout defined here; an indexing slip would corrupt embedded
//! bits silently, so every out-of-range coordinate is an error.
//!
//! # Architecture
//!
//! - **BitPlane**: one 8x8 plane in a `u64`
//! - **codec**: fixed depth <-> channel mapping (depths 0-7 blue, 8-15 green,
//!   16-23 red, 24-31 alpha, LSB first)
//! - **PlaneBlock**: 32 planes for one tile, with per-pixel pack/unpack
//! - **Grid**: the truncated image as a flat arena of blocks
//! - **transform**: whole-grid PBC <-> CGC conversion
//! - **config**: `GridConfig` / `GridSnapshot` persistence
//!
//! Image decoding, complexity measurement, conjugation and payload handling
//! live outside this crate.
//!
//! # Examples
//!
//! ```
//! use bpcs_planes::{Channel, Grid};
//!
//! // 9x19 image -> 8x16 usable pixels, 1x2 blocks
//! let mut grid = Grid::new(9, 19)?;
//! assert!(grid.in_range(7, 15));
//! assert!(!grid.in_range(8, 0));
//!
//! grid.set_color(7, 15, 0xFF_C0_80_40)?;
//! let color = grid.get_color(7, 15)?;
//! assert_eq!(Channel::Red.extract(color), 0xC0);
//!
//! // Red MSB lives at depth 23
//! let plane = grid.bit_plane(0, 1, 23)?;
//! assert!(plane.get(7, 7)?);
//! # Ok::<(), bpcs_planes::BpcsError>(())
//! ```
//!
//! # Threading
//!
//! A `Grid` is plain owned data with no interior mutability. Mutation goes
//! through `&mut self`, so concurrent writers are ruled out by the borrow
//! checker.

pub mod bitplane;
pub mod block;
pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod transform;

pub use bitplane::{BitPlane, BITS_PER_PLANE, BLOCK_SIDE};
pub use block::PlaneBlock;
pub use codec::{Channel, BITS_PER_CHANNEL, NUM_CHANNELS, PLANE_DEPTH};
pub use config::{GridConfig, GridSnapshot};
pub use error::{BpcsError, Result};
pub use grid::{Grid, MAX_PIXELS};
pub use transform::Coding;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "bpcs-planes";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
