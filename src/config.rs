//! Grid configuration and snapshot serialization.
//!
//! Two layers:
//! 1. **GridConfig** - the requested image extent a grid is built from
//! 2. **GridSnapshot** - a config plus every stored plane and the current coding
//!
//! Both encode to pretty JSON (`serde_json`) or compact binary (`bincode`).
//!
//! # Example
//!
//! ```
//! use bpcs_planes::{Grid, GridSnapshot};
//!
//! let mut grid = Grid::new(17, 9)?;
//! grid.set_color(12, 3, 0xABCD_EF01)?;
//!
//! let bytes = grid.to_snapshot().to_binary()?;
//! let restored = Grid::from_snapshot(&GridSnapshot::from_binary(&bytes)?)?;
//! assert_eq!(restored.get_color(12, 3)?, 0xABCD_EF01);
//! # Ok::<(), bpcs_planes::BpcsError>(())
//! ```

use crate::error::{BpcsError, Result};
use crate::transform::Coding;
use serde::{Deserialize, Serialize};

/// Requested image dimensions, before truncation to whole blocks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridConfig {
    /// Requested image width in pixels
    pub width: usize,
    /// Requested image height in pixels
    pub height: usize,
}

impl GridConfig {
    /// Create a configuration for a `width` x `height` image.
    ///
    /// Not validated here; [`Grid::from_config`](crate::Grid::from_config)
    /// rejects extents that are too small or too large.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BpcsError::Other(e.to_string()))
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BpcsError::Other(e.to_string()))
    }

    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

/// Full grid state.
///
/// `planes` holds 32 plane words per block, blocks in
/// `block_y * block_width + block_x` order, depth 0 first within a block.
/// Validated against `config` on [`Grid::from_snapshot`](crate::Grid::from_snapshot).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSnapshot {
    /// Requested dimensions of the captured grid
    pub config: GridConfig,
    /// Coding of the stored planes
    pub coding: Coding,
    /// Raw plane words
    pub planes: Vec<u64>,
}

impl GridSnapshot {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BpcsError::Other(e.to_string()))
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BpcsError::Other(e.to_string()))
    }

    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }
}
