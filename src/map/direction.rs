//! # Direction Module
//!
//! This module defines the face directions of a cube and the axes they step along.
//! The map uses a Z-up convention: north is +Y, east is +X and up is +Z.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// One of the three coordinate axes.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Axis {
    /// East-west axis
    X,
    /// North-south axis
    Y,
    /// Vertical axis
    Z,
}

/// Represents the faces of a cube a mesh can be generated for.
///
/// The six axis-aligned directions name flat and wall faces. `None` names the
/// sloped surface cutting through the cube, which is not aligned to any axis.
///
/// Each variant is assigned a stable integer value so it can be converted back
/// with `num_traits::FromPrimitive`.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum Direction {
    /// Facing positive Y
    North = 0,
    /// Facing negative Y
    South = 1,
    /// Facing positive X
    East = 2,
    /// Facing negative X
    West = 3,
    /// Facing positive Z
    Up = 4,
    /// Facing negative Z
    Down = 5,
    /// The sloped surface inside the cube
    None = 6,
}

impl Direction {
    /// Returns the six axis-aligned directions.
    pub fn axial() -> [Direction; 6] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Up,
            Direction::Down,
        ]
    }

    /// Returns the four wall directions.
    pub fn lateral() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    /// Returns every direction a face can be generated for, including `None`.
    pub fn all() -> [Direction; 7] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Up,
            Direction::Down,
            Direction::None,
        ]
    }

    /// The unit step this direction takes along `axis`: -1, 0 or 1.
    pub fn value_on_axis(self, axis: Axis) -> i32 {
        match (self, axis) {
            (Direction::East, Axis::X) | (Direction::North, Axis::Y) | (Direction::Up, Axis::Z) => 1,
            (Direction::West, Axis::X) | (Direction::South, Axis::Y) | (Direction::Down, Axis::Z) => {
                -1
            }
            _ => 0,
        }
    }

    /// The direction pointing the other way. `None` is its own opposite.
    pub fn invert(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::None => Direction::None,
        }
    }

    /// True for north, south, east and west.
    pub fn is_lateral(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::South | Direction::East | Direction::West
        )
    }

    /// The unit vector of this direction, zero for `None`.
    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(
            self.value_on_axis(Axis::X) as f32,
            self.value_on_axis(Axis::Y) as f32,
            self.value_on_axis(Axis::Z) as f32,
        )
    }
}
