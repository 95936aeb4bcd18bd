//! Background tasks for the map.
//!
//! # Available Tasks
//! - `CellGenerationTask`: Fills a cell from the heightfield and schedules its meshing

pub mod cell_generation_task;

pub use cell_generation_task::CellGenerationTask;
