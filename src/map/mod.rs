//! # Map Module
//!
//! This module holds the map-side description of terrain the mesher consumes.
//!
//! ## Architecture
//!
//! * **CubeShape**: Four quantized corner heights and a split diagonal for one cube
//! * **FaceShape**: A cube, its neighbour and a face direction; the mesh cache key
//! * **CubeIndex**: A packed coordinate of a cube inside a cell, per detail level
//! * **Cell**: A fixed-size block of cube shapes that enumerates its visible faces
//! * **World**: The cells filled so far, shared with the workers that mesh them
//!
//! ## Data Flow
//!
//! 1. A cell is filled with cube shapes from a heightfield
//! 2. `Cell::faces` walks the cell at a detail level with `CubeIndex`
//! 3. Each visible face yields a `FaceShape` for the tile mesh cache

pub mod cell;
pub mod cube_index;
pub mod cube_shape;
pub mod direction;
pub mod face_shape;
pub mod tasks;
pub mod world;

/// Number of detail levels a cell can be enumerated at.
pub const CELL_DETAIL_LEVELS: u8 = 6;

/// Number of cubes along each edge of a cell at detail level 0.
pub const CELL_EDGE_SIZE: usize = 1 << (CELL_DETAIL_LEVELS - 1);

/// Total number of cubes in a cell at detail level 0.
pub const CUBES_PER_CELL: usize = CELL_EDGE_SIZE * CELL_EDGE_SIZE * CELL_EDGE_SIZE;
