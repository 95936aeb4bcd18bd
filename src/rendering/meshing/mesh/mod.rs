//! Geometry generation for individual cube faces.
//!
//! Every generator is a pure function of a `FaceShape`: it builds its patch in a
//! fresh `MeshBuilder` and shares no state with other calls, so any number of
//! workers may run them at once.
//!
//! # Architecture
//! - [`MeshData`]: Positions, normals, texture coordinates and triangles of one face
//! - [`flat_face_mesh`]: Floor and ceiling halves of a cube
//! - [`side_face_mesh`]: Walls between a cube and a lateral neighbour
//! - [`slope_face_mesh`]: The folded top surface, its skirt and the bisector
//! - [`generate`]: Picks the generator for a face direction

mod flat;
mod mesh_data;
mod side;
mod slope;

pub use flat::flat_face_mesh;
pub use mesh_data::{MeshBuilder, MeshData};
pub use side::{side_face_mesh, wall_heights, WallHeights};
pub use slope::slope_face_mesh;

use crate::map::{direction::Direction, face_shape::FaceShape};

/// Builds the geometry for a face, dispatching on its direction.
///
/// - `None` builds the sloped surface
/// - `Up` and `Down` build the flat halves, if the cube has a floor or ceiling
/// - the four lateral directions build a wall
pub fn generate(shape: &FaceShape) -> Option<MeshData> {
    match shape.direction() {
        Direction::None => slope_face_mesh(shape),
        Direction::Up | Direction::Down => {
            let cube = shape.source();
            if cube.has_floor() || cube.has_ceiling() {
                flat_face_mesh(shape)
            } else {
                None
            }
        }
        Direction::North | Direction::South | Direction::East | Direction::West => {
            side_face_mesh(shape)
        }
    }
}
