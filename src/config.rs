//! # Configuration Module
//!
//! Runtime settings for the mesher binary, stored as JSON.
//!
//! A missing file is not an error: the defaults are used and the fallback is
//! logged. A file that exists but cannot be read or parsed is reported, since
//! silently ignoring a typo in a config is worse than stopping.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::{error::TerrainError, map::CELL_DETAIL_LEVELS, rendering::AtlasRect};

/// Heightfield parameters used to fill cells with terrain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Perlin noise seed
    pub seed: u32,
    /// Scaling applied to world x/y before sampling noise
    pub noise_scale: f64,
    /// Terrain height, in cubes, where the noise is zero
    pub base_height: f64,
    /// Terrain height change, in cubes, across the noise range
    pub height_amplitude: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            seed: 0,
            noise_scale: 0.04,
            base_height: 12.0,
            height_amplitude: 8.0,
        }
    }
}

/// Settings for a mesher run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherConfig {
    /// Number of worker threads building cell meshes
    pub worker_count: usize,
    /// Detail level cells are meshed at, `0..CELL_DETAIL_LEVELS`
    pub detail_level: u8,
    /// Cells built along x and y; the grid is one cell deep
    pub cells_per_axis: i32,
    /// Heightfield used to fill the cells
    pub terrain: TerrainConfig,
    /// Atlas rectangle the terrain texture occupies
    pub atlas: AtlasRect,
}

impl Default for MesherConfig {
    fn default() -> Self {
        MesherConfig {
            worker_count: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            detail_level: 0,
            cells_per_axis: 2,
            terrain: TerrainConfig::default(),
            atlas: AtlasRect::FULL,
        }
    }
}

impl MesherConfig {
    /// Reads a config file, falling back to defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, is not valid JSON,
    /// or holds values the mesher cannot run with.
    pub fn load(path: &Path) -> Result<Self, TerrainError> {
        let config = match fs::read_to_string(path) {
            Ok(text) => {
                info!("found config at {}", path.display());
                serde_json::from_str::<MesherConfig>(&text).map_err(|source| {
                    TerrainError::ConfigParse {
                        path: PathBuf::from(path),
                        source,
                    }
                })?
            }
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                info!("{} not found, using defaults", path.display());
                MesherConfig::default()
            }
            Err(source) => {
                return Err(TerrainError::ConfigIo {
                    path: PathBuf::from(path),
                    source,
                })
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Like `load`, but logs any error and returns the defaults instead.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!("{err}");
                warn!("continuing with default configuration");
                MesherConfig::default()
            }
        }
    }

    /// Checks the values the mesher cannot run with.
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidDetailLevel` or `TerrainError::InvalidConfig`.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.detail_level >= CELL_DETAIL_LEVELS {
            return Err(TerrainError::InvalidDetailLevel(self.detail_level));
        }
        if self.worker_count == 0 {
            return Err(TerrainError::InvalidConfig(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.cells_per_axis < 1 {
            return Err(TerrainError::InvalidConfig(
                "cells_per_axis must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
