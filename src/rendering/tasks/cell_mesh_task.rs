//! Task for meshing a filled cell on a worker thread.

use std::sync::Arc;

use log::error;

use crate::{
    core::MtResource,
    error::TerrainError,
    map::cell::Cell,
    rendering::{AtlasRect, CellMesh, CellMeshStore, TileMeshCache},
    task_management::{Task, TaskContext, TaskResult},
};

/// Builds the mesh of one cell from the shared tile cache.
pub struct CellMeshTask {
    /// The cell to mesh
    cell: MtResource<Cell>,
    /// Tile cache shared with every other meshing task
    cache: Arc<TileMeshCache>,
    /// Detail level to walk the cell at
    detail_level: u8,
    /// Atlas rectangle for every face
    atlas: AtlasRect,
}

impl CellMeshTask {
    /// Creates a new cell mesh task.
    ///
    /// # Arguments
    /// * `cell` - The cell to mesh
    /// * `cache` - The shared tile mesh cache
    /// * `detail_level` - Detail level to walk the cell at
    /// * `atlas` - Atlas rectangle applied to every face
    pub fn new(
        cell: MtResource<Cell>,
        cache: Arc<TileMeshCache>,
        detail_level: u8,
        atlas: AtlasRect,
    ) -> Self {
        CellMeshTask {
            cell,
            cache,
            detail_level,
            atlas,
        }
    }
}

impl Task for CellMeshTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let cell = self.cell.get();
        let mesh = CellMesh::build(&cell, &self.cache, self.detail_level, &self.atlas);
        Box::new(CellMeshTaskResult { mesh })
    }
}

/// A built cell mesh, or why it could not be built.
pub struct CellMeshTaskResult {
    mesh: Result<CellMesh, TerrainError>,
}

impl TaskResult for CellMeshTaskResult {
    /// Stores the mesh; failures are logged and dropped.
    fn handle_result(
        self: Box<Self>,
        _context: &TaskContext,
        store: &mut CellMeshStore,
    ) -> Vec<Box<dyn Task + Send>> {
        match self.mesh {
            Ok(mesh) => {
                store.insert(mesh);
            }
            Err(err) => error!("Failed to mesh cell: {err}"),
        }
        Vec::new()
    }
}
