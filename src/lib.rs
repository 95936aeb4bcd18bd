#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Terrain Mesh
//!
//! Builds renderable geometry for voxel terrain whose cubes are not simply full
//! or empty. Each cube stores a quantized height at its four top corners and a
//! diagonal to fold along; from that the mesher derives flat floor and ceiling
//! halves, walls against neighbouring cubes, and sloped surfaces with their
//! skirts.
//!
//! ## Key Modules
//!
//! * `map` - Cube shapes, packed cube coordinates, cells and the world
//! * `rendering` - Face generators, the shared tile mesh cache, atlas mapping and cell meshes
//! * `task_management` - The worker pool cells are filled and meshed on
//! * `config` - JSON run settings
//! * `core` - Shared resource containers
//!
//! ## Usage
//!
//! ```rust
//! use terrain_mesh::{config::MesherConfig, mesh_grid};
//!
//! let mut config = MesherConfig::default();
//! config.cells_per_axis = 1;
//! config.detail_level = 3;
//!
//! let (store, stats) = mesh_grid(&config).unwrap();
//! assert_eq!(store.len(), 1);
//! assert!(stats.misses > 0);
//! ```

use std::{path::PathBuf, sync::Arc, time::Instant};

use cgmath::Point3;
use log::info;

pub mod config;
pub mod core;
pub mod error;
pub mod map;
pub mod rendering;
pub mod task_management;

use crate::{
    config::MesherConfig,
    core::MtResource,
    error::TerrainError,
    map::{tasks::CellGenerationTask, world::World},
    rendering::{CacheStats, CellMeshStore, TileMeshCache},
    task_management::{TaskContext, TaskManager},
};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "terrain-mesh.json";

/// Fills and meshes a `cells_per_axis` x `cells_per_axis` grid of cells.
///
/// Cells are filled from the configured heightfield and meshed on
/// `worker_count` threads sharing one tile mesh cache.
///
/// # Returns
/// The cell meshes and the cache counters after the run
///
/// # Errors
/// Returns an error if the configuration does not validate.
pub fn mesh_grid(config: &MesherConfig) -> Result<(CellMeshStore, CacheStats), TerrainError> {
    config.validate()?;

    let context = TaskContext {
        world: MtResource::new(World::new(config.terrain.clone())),
        cache: Arc::new(TileMeshCache::new()),
        detail_level: config.detail_level,
        atlas: config.atlas,
    };
    let mut task_manager = TaskManager::new(config.worker_count, context.clone());
    let mut store = CellMeshStore::new();

    for x in 0..config.cells_per_axis {
        for y in 0..config.cells_per_axis {
            task_manager.publish_task(Box::new(CellGenerationTask::new(
                context.world.clone(),
                Point3::new(x, y, 0),
            )));
        }
    }

    task_manager.run_until_idle(&mut store);
    task_manager.shutdown();

    Ok((store, context.cache.stats()))
}

/// Entry point of the `terrain-mesh` binary.
///
/// Reads the config named by the first argument, or `DEFAULT_CONFIG_PATH`,
/// meshes the configured grid and logs a summary.
///
/// # Errors
/// Returns an error if the config cannot be read, parsed or validated.
pub fn run() -> Result<(), TerrainError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = MesherConfig::load(&path)?;

    let started = Instant::now();
    let (store, stats) = mesh_grid(&config)?;

    let mut meshes: Vec<_> = store.iter().collect();
    meshes.sort_by_key(|mesh| (mesh.coordinate.x, mesh.coordinate.y, mesh.coordinate.z));
    for mesh in meshes {
        info!(
            "Cell {:?}: {} faces, {} triangles, {} vertex bytes",
            mesh.coordinate,
            mesh.face_count,
            mesh.triangle_count(),
            mesh.buffer.vertex_bytes().len()
        );
    }

    info!(
        "Meshed {} cells at detail level {} in {:?}: {} triangles",
        store.len(),
        config.detail_level,
        started.elapsed(),
        store.triangle_count()
    );
    info!(
        "Tile cache: {} hits, {} misses, {} patches generated",
        stats.hits, stats.misses, stats.generated
    );

    Ok(())
}
