//! # Face Shape Module
//!
//! A `FaceShape` is everything needed to build one face of a cube: the cube's own
//! shape, the shape of its neighbour on that side, and the face direction.
//! It is the key of the tile mesh cache, so equality and hashing are structural.

use super::{cube_shape::CubeShape, direction::Direction};

/// The shape of a single renderable cube face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceShape {
    source: CubeShape,
    adjacent: CubeShape,
    direction: Direction,
}

impl FaceShape {
    /// Creates a face shape.
    ///
    /// # Arguments
    /// * `source` - The cube the face belongs to
    /// * `adjacent` - The neighbouring cube in `direction`; ignored by flat and slope faces
    /// * `direction` - Which face of `source`, or `Direction::None` for its slope
    pub fn new(source: CubeShape, adjacent: CubeShape, direction: Direction) -> Self {
        FaceShape {
            source,
            adjacent,
            direction,
        }
    }

    /// The cube the face belongs to.
    pub fn source(&self) -> &CubeShape {
        &self.source
    }

    /// The neighbouring cube the face looks into.
    pub fn adjacent(&self) -> &CubeShape {
        &self.adjacent
    }

    /// The face direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
