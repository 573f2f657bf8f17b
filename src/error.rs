//! Error types for bit-plane grid operations.
//!
//! Every invariant violation in this crate is a caller bug in coordinate
//! arithmetic, so each variant carries the offending value and the limit it
//! broke. Operations that return an error leave all state untouched.

use thiserror::Error;

/// The main error type for bit-plane grid operations.
#[derive(Error, Debug)]
pub enum BpcsError {
    /// Absolute pixel coordinate outside the effective (truncated) extent
    #[error("Pixel ({x}, {y}) out of range for {width}x{height} grid")]
    PixelOutOfRange {
        /// Requested x
        x: usize,
        /// Requested y
        y: usize,
        /// Effective width in pixels
        width: usize,
        /// Effective height in pixels
        height: usize,
    },

    /// Block coordinate outside the grid
    #[error("Block ({block_x}, {block_y}) out of range for {block_width}x{block_height} blocks")]
    BlockOutOfRange {
        /// Requested block x
        block_x: usize,
        /// Requested block y
        block_y: usize,
        /// Grid width in blocks
        block_width: usize,
        /// Grid height in blocks
        block_height: usize,
    },

    /// Intra-block coordinate outside `[0, 8) x [0, 8)`
    #[error("Intra-block coordinate ({rx}, {ry}) out of range (side {side})")]
    IntraBlockOutOfRange {
        /// Requested relative x
        rx: usize,
        /// Requested relative y
        ry: usize,
        /// Block side length
        side: usize,
    },

    /// Bit-plane depth outside `[0, 32)`
    #[error("Bit-plane depth {depth} out of range (depth count {max})")]
    DepthOutOfRange {
        /// Requested depth
        depth: usize,
        /// Number of planes per block
        max: usize,
    },

    /// Bit position within a channel outside `[0, 8)`
    #[error("Channel bit {bit} out of range (bits per channel {max})")]
    ChannelBitOutOfRange {
        /// Requested bit
        bit: usize,
        /// Bits per channel
        max: usize,
    },

    /// Color value that does not fit in an unsigned 32-bit channel-packed integer
    #[error("Color value {0} does not fit in 32 bits")]
    ColorOutOfRange(i64),

    /// Requested image extent cannot hold one full block plus margin
    #[error("Image too small: {width}x{height} (each side must exceed {side})")]
    ImageTooSmall {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Block side length
        side: usize,
    },

    /// Requested image extent exceeds the supported pixel count
    #[error("Image too large: {width}x{height} (max {max_pixels} pixels)")]
    ImageTooLarge {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// Largest supported effective pixel count
        max_pixels: usize,
    },

    /// Persisted state does not match the dimensions it claims
    #[error("Dimension mismatch: expected {expected} planes, got {actual}")]
    DimensionMismatch {
        /// Plane count implied by the stored configuration
        expected: usize,
        /// Plane count actually stored
        actual: usize,
    },

    /// Serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// A specialized `Result` type for bit-plane grid operations.
pub type Result<T> = std::result::Result<T, BpcsError>;
