//! # Task System Core Traits
//!
//! ## Core Components
//! - `Task`: A unit of work run on a worker thread
//! - `TaskResult`: What a task hands back to the coordinating thread
//!
//! ## Task Lifecycle
//! 1. A `Task` is published via `TaskManager::publish_task()`
//! 2. The task's `process()` method runs on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` runs on the coordinating thread
//! 5. The result can store a finished mesh or spawn follow-up tasks

use crate::rendering::CellMeshStore;

use super::TaskContext;

/// A unit of work that can run on any worker.
///
/// Tasks own or share (through `MtResource` and `Arc`) everything they touch,
/// so they can be moved to a worker thread.
pub trait Task: Send {
    /// Does the work and returns a result for the coordinating thread.
    ///
    /// Errors are reported through the result rather than by panicking, so a
    /// bad input does not take a worker down.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The outcome of a `Task`, consumed on the coordinating thread.
pub trait TaskResult: Send {
    /// Applies the result.
    ///
    /// # Arguments
    /// * `context` - Shared state follow-up tasks may need
    /// * `store` - Where finished cell meshes are kept
    ///
    /// # Returns
    /// Follow-up tasks to publish; may be empty
    fn handle_result(
        self: Box<Self>,
        context: &TaskContext,
        store: &mut CellMeshStore,
    ) -> Vec<Box<dyn Task + Send>>;
}
