//! # Cell Generation Task
//!
//! Fills a cell from the world's heightfield on a worker thread, then asks for
//! the cell to be meshed.

use cgmath::Point3;

use crate::{
    core::MtResource,
    map::{cell::Cell, world::World},
    rendering::{tasks::CellMeshTask, CellMeshStore},
    task_management::{Task, TaskContext, TaskResult},
};

/// Fills the cell at a position and stores it in the world.
pub struct CellGenerationTask {
    /// The world the cell is added to
    world: MtResource<World>,
    /// Cell coordinate to fill
    position: Point3<i32>,
}

impl CellGenerationTask {
    /// Creates a new cell generation task.
    ///
    /// # Arguments
    /// * `world` - The world to add the cell to
    /// * `position` - Cell coordinate to fill
    pub fn new(world: MtResource<World>, position: Point3<i32>) -> Self {
        CellGenerationTask { world, position }
    }
}

impl Task for CellGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        // Fill outside the world lock so other workers can fill in parallel.
        let existing = self.world.get().get_cell_at(self.position);
        let cell = match existing {
            Some(cell) => cell,
            None => {
                let terrain = self.world.get().terrain().clone();
                let filled = Cell::perlin(self.position, &terrain);
                // another worker may have stored this cell meanwhile; keep theirs
                self.world.get_mut().insert_cell(filled)
            }
        };

        Box::new(CellGenerationTaskResult { cell })
    }
}

/// A filled cell waiting to be meshed.
pub struct CellGenerationTaskResult {
    cell: MtResource<Cell>,
}

impl TaskResult for CellGenerationTaskResult {
    /// Schedules meshing for the filled cell.
    fn handle_result(
        self: Box<Self>,
        context: &TaskContext,
        _store: &mut CellMeshStore,
    ) -> Vec<Box<dyn Task + Send>> {
        let mesh_task: Box<dyn Task + Send> = Box::new(CellMeshTask::new(
            self.cell,
            context.cache.clone(),
            context.detail_level,
            context.atlas,
        ));
        vec![mesh_task]
    }
}
