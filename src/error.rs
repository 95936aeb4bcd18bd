//! # Error Module
//!
//! Errors raised when building map descriptors or loading configuration.
//!
//! Geometry generation itself never fails: a face with nothing to draw is
//! reported as `None`, not as an error. The variants here only cover inputs
//! that break a precondition before any meshing starts.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the terrain mesher.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// A corner height was outside `BELOW_CUBE_HEIGHT..=CUBE_TOP_HEIGHT`.
    #[error("corner height {value} for {corner} is outside 0..={max}")]
    InvalidCornerHeight {
        /// Which corner was rejected
        corner: &'static str,
        /// The rejected value
        value: u8,
        /// Largest accepted value
        max: u8,
    },

    /// A detail level was not below `CELL_DETAIL_LEVELS`.
    #[error("detail level {0} is not below {max}", max = crate::map::CELL_DETAIL_LEVELS)]
    InvalidDetailLevel(u8),

    /// The configuration asked for something the mesher cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file was not valid JSON for `MesherConfig`.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// File that failed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}
