//! Background tasks for the rendering side.
//!
//! # Available Tasks
//! - `CellMeshTask`: Builds a cell's mesh from the shared tile cache

pub mod cell_mesh_task;

pub use cell_mesh_task::CellMeshTask;
