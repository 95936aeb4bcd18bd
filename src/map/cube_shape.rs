//! # Cube Shape Module
//!
//! A cube shape describes how the terrain surface slices through one unit cube.
//! It is made of four quantized corner heights plus the diagonal the top surface
//! is split along. Everything the mesher draws for a cube is derived from this.
//!
//! ## Height Quantization
//!
//! Corner heights are counted in `1 / HEIGHT_FRACTIONS` steps of a cube edge:
//!
//! - `BELOW_CUBE_HEIGHT` (0): the surface passes below this cube
//! - `CUBE_BOTTOM_HEIGHT` (1): the surface rests on the cube's floor
//! - `CUBE_TOP_HEIGHT` (`HEIGHT_FRACTIONS + 1`): the surface reaches the cube's top
//!
//! A corner of height `h` sits at `(h - 1) / HEIGHT_FRACTIONS - HALFCUBE` in a
//! unit cube centred on the origin.

use crate::error::TerrainError;

use super::direction::Direction;

/// A quantized corner height.
pub type CornerHeight = u8;

/// Number of height steps per cube edge.
pub const HEIGHT_FRACTIONS: CornerHeight = 8;
/// Sentinel for a corner whose surface lies under the cube.
pub const BELOW_CUBE_HEIGHT: CornerHeight = 0;
/// Height of a corner resting on the cube floor.
pub const CUBE_BOTTOM_HEIGHT: CornerHeight = 1;
/// Height of a corner at the top of the cube.
pub const CUBE_TOP_HEIGHT: CornerHeight = HEIGHT_FRACTIONS + 1;

/// Half the edge length of a cube; cubes are centred on the origin.
pub const HALFCUBE: f32 = 0.5;

/// Converts a corner height into a z offset inside a cube centred on the origin.
pub fn corner_z(height: CornerHeight) -> f32 {
    height_fraction(height) - HALFCUBE
}

/// Converts a corner height into the fraction of the cube edge it covers.
///
/// `CUBE_BOTTOM_HEIGHT` maps to 0.0 and `CUBE_TOP_HEIGHT` to 1.0. The below
/// sentinel maps slightly under zero and is only fed in by callers that clamp.
pub fn height_fraction(height: CornerHeight) -> f32 {
    (height as f32 - 1.0) / HEIGHT_FRACTIONS as f32
}

/// The terrain shape inside one cube.
///
/// Two shapes with the same corners and split flag are interchangeable, which is
/// what makes them usable as mesh cache keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CubeShape {
    north_east: CornerHeight,
    north_west: CornerHeight,
    south_east: CornerHeight,
    south_west: CornerHeight,
    split: bool,
}

impl CubeShape {
    /// A cube with no terrain in it.
    pub const SKY: CubeShape = CubeShape {
        north_east: BELOW_CUBE_HEIGHT,
        north_west: BELOW_CUBE_HEIGHT,
        south_east: BELOW_CUBE_HEIGHT,
        south_west: BELOW_CUBE_HEIGHT,
        split: false,
    };

    /// A cube completely filled with terrain.
    pub const SOLID: CubeShape = CubeShape {
        north_east: CUBE_TOP_HEIGHT,
        north_west: CUBE_TOP_HEIGHT,
        south_east: CUBE_TOP_HEIGHT,
        south_west: CUBE_TOP_HEIGHT,
        split: false,
    };

    /// Creates a cube shape from its four corners.
    ///
    /// # Arguments
    /// * `north_east`, `north_west`, `south_east`, `south_west` - Corner heights
    /// * `split` - `true` to split the top along the NW-SE diagonal, `false` for SW-NE
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidCornerHeight` if any corner is above `CUBE_TOP_HEIGHT`.
    pub fn new(
        north_east: CornerHeight,
        north_west: CornerHeight,
        south_east: CornerHeight,
        south_west: CornerHeight,
        split: bool,
    ) -> Result<Self, TerrainError> {
        for (corner, value) in [
            ("north east", north_east),
            ("north west", north_west),
            ("south east", south_east),
            ("south west", south_west),
        ] {
            if value > CUBE_TOP_HEIGHT {
                return Err(TerrainError::InvalidCornerHeight {
                    corner,
                    value,
                    max: CUBE_TOP_HEIGHT,
                });
            }
        }

        Ok(CubeShape {
            north_east,
            north_west,
            south_east,
            south_west,
            split,
        })
    }

    /// Creates a cube whose four corners share one height.
    pub fn flat(height: CornerHeight) -> Result<Self, TerrainError> {
        Self::new(height, height, height, height, false)
    }

    /// Height of the north east corner.
    pub fn north_east(&self) -> CornerHeight {
        self.north_east
    }

    /// Height of the north west corner.
    pub fn north_west(&self) -> CornerHeight {
        self.north_west
    }

    /// Height of the south east corner.
    pub fn south_east(&self) -> CornerHeight {
        self.south_east
    }

    /// Height of the south west corner.
    pub fn south_west(&self) -> CornerHeight {
        self.south_west
    }

    /// `true` when the top surface is split along the NW-SE diagonal.
    pub fn is_split(&self) -> bool {
        self.split
    }

    /// The corners of the two split halves, in the order the mesher walks them.
    ///
    /// NW-SE split: `[SE, NE, NW]` and `[NW, SW, SE]`.
    /// SW-NE split: `[NE, NW, SW]` and `[SW, SE, NE]`.
    pub fn halves(&self) -> [[CornerHeight; 3]; 2] {
        if self.split {
            [
                [self.south_east, self.north_east, self.north_west],
                [self.north_west, self.south_west, self.south_east],
            ]
        } else {
            [
                [self.north_east, self.north_west, self.south_west],
                [self.south_west, self.south_east, self.north_east],
            ]
        }
    }

    /// No corner reaches into this cube.
    pub fn is_sky(&self) -> bool {
        self.corners().iter().all(|c| *c == BELOW_CUBE_HEIGHT)
    }

    /// Every corner is at the top of the cube.
    pub fn is_solid(&self) -> bool {
        self.corners().iter().all(|c| *c == CUBE_TOP_HEIGHT)
    }

    /// One split half lies flat on the cube floor.
    pub fn has_floor(&self) -> bool {
        self.halves()
            .iter()
            .any(|half| half.iter().all(|c| *c == CUBE_BOTTOM_HEIGHT))
    }

    /// One split half lies flat against the cube top while the cube is not full.
    pub fn has_ceiling(&self) -> bool {
        !self.is_solid()
            && self
                .halves()
                .iter()
                .any(|half| half.iter().all(|c| *c == CUBE_TOP_HEIGHT))
    }

    /// Whether terrain in this cube touches the given face.
    pub fn has_face(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.reaches(self.north_east, self.north_west),
            Direction::South => self.reaches(self.south_east, self.south_west),
            Direction::East => self.reaches(self.north_east, self.south_east),
            Direction::West => self.reaches(self.north_west, self.south_west),
            Direction::Up => self.has_ceiling(),
            Direction::Down => self.has_floor(),
            Direction::None => !self.is_sky() && !self.is_solid(),
        }
    }

    fn reaches(&self, left: CornerHeight, right: CornerHeight) -> bool {
        left > BELOW_CUBE_HEIGHT || right > BELOW_CUBE_HEIGHT
    }

    fn corners(&self) -> [CornerHeight; 4] {
        [
            self.north_east,
            self.north_west,
            self.south_east,
            self.south_west,
        ]
    }
}

impl Default for CubeShape {
    fn default() -> Self {
        CubeShape::SKY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_corners_above_top() {
        let err = CubeShape::new(CUBE_TOP_HEIGHT + 1, 1, 1, 1, false).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::InvalidCornerHeight {
                corner: "north east",
                ..
            }
        ));
        assert!(CubeShape::new(CUBE_TOP_HEIGHT, 0, 0, 0, true).is_ok());
    }

    #[test]
    fn sentinel_heights_map_to_cube_extremes() {
        assert_eq!(corner_z(CUBE_BOTTOM_HEIGHT), -HALFCUBE);
        assert_eq!(corner_z(CUBE_TOP_HEIGHT), HALFCUBE);
        assert_eq!(height_fraction(5), 0.5);
    }

    #[test]
    fn sky_and_solid_predicates() {
        assert!(CubeShape::SKY.is_sky());
        assert!(!CubeShape::SKY.has_face(Direction::None));
        assert!(CubeShape::SOLID.is_solid());
        assert!(!CubeShape::SOLID.has_ceiling());
        assert!(!CubeShape::SOLID.has_face(Direction::None));
        for direction in Direction::lateral() {
            assert!(CubeShape::SOLID.has_face(direction));
            assert!(!CubeShape::SKY.has_face(direction));
        }
    }

    #[test]
    fn floor_follows_split_halves() {
        // NE, NW, SW on the floor: a full half for the SW-NE split only.
        let shape = CubeShape::new(1, 1, 5, 1, false).unwrap();
        assert!(shape.has_floor());
        let shape = CubeShape::new(1, 1, 5, 1, true).unwrap();
        assert!(!shape.has_floor());
    }

    #[test]
    fn ceiling_needs_a_partial_cube() {
        let shape = CubeShape::new(9, 9, 9, 4, true).unwrap();
        assert!(shape.has_ceiling());
        assert!(shape.has_face(Direction::Up));
        assert!(shape.has_face(Direction::None));
    }

    #[test]
    fn lateral_faces_follow_edge_corners() {
        let shape = CubeShape::new(3, 0, 0, 0, false).unwrap();
        assert!(shape.has_face(Direction::North));
        assert!(shape.has_face(Direction::East));
        assert!(!shape.has_face(Direction::South));
        assert!(!shape.has_face(Direction::West));
    }
}
