//! # Cell Module
//!
//! A `Cell` is a fixed 32x32x32 block of cube shapes, the unit the map is rebuilt in.
//!
//! ## Storage
//!
//! - `shapes`: one `CubeShape` per cube, stored in level-0 `CubeIndex` order
//!   (x fastest, then y, then z), so a packed index is also the array offset
//! - `occupied`: a bit per cube that is not sky, so face enumeration can skip
//!   empty air without touching the shape array
//!
//! ## Detail Levels
//!
//! At detail level `L` a cell is walked as `(32 >> L)^3` coarse cubes. Each coarse
//! cube takes the shape of the level-0 cube at its minimum corner, and neighbours
//! are looked up one coarse step away. Neighbours outside the cell count as sky.

use bitvec::prelude::BitVec;
use cgmath::Point3;
use log::debug;
use noise::{NoiseFn, Perlin};

use crate::{config::TerrainConfig, error::TerrainError};

use super::{
    cube_index::CubeIndex,
    cube_shape::{
        CornerHeight, CubeShape, BELOW_CUBE_HEIGHT, CUBE_BOTTOM_HEIGHT, CUBE_TOP_HEIGHT,
        HEIGHT_FRACTIONS,
    },
    direction::{Axis, Direction},
    face_shape::FaceShape,
    CELL_EDGE_SIZE, CUBES_PER_CELL,
};

/// A visible face found while walking a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    /// Position of the cube at the walked detail level
    pub index: CubeIndex,
    /// The shape to fetch a mesh for
    pub shape: FaceShape,
}

impl Face {
    /// The face direction.
    pub fn direction(&self) -> Direction {
        self.shape.direction()
    }
}

/// A block of `CELL_EDGE_SIZE`^3 cube shapes.
pub struct Cell {
    /// Position of this cell in cell coordinates (not cube coordinates).
    pub coordinate: Point3<i32>,
    shapes: Vec<CubeShape>,
    occupied: BitVec,
}

impl Cell {
    /// Creates a cell filled with sky.
    pub fn new(coordinate: Point3<i32>) -> Self {
        let mut occupied = BitVec::with_capacity(CUBES_PER_CELL);
        occupied.resize(CUBES_PER_CELL, false);

        Cell {
            coordinate,
            shapes: vec![CubeShape::SKY; CUBES_PER_CELL],
            occupied,
        }
    }

    /// Fills a cell from a continuous height function.
    ///
    /// `height(x, y)` returns the terrain surface height, in cubes, at world column
    /// `(x, y)`. Each cube corner is quantized against the cube's floor: below it
    /// becomes `BELOW_CUBE_HEIGHT`, at or above the cube's top becomes
    /// `CUBE_TOP_HEIGHT`, anything between rounds down to a height fraction.
    ///
    /// The top of each cube is split along whichever diagonal has the smaller
    /// height difference, which keeps the fold close to the sampled surface.
    pub fn from_heightfield<F>(coordinate: Point3<i32>, height: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut cell = Cell::new(coordinate);
        let edge = CELL_EDGE_SIZE as i32;
        let columns = CELL_EDGE_SIZE + 1;

        // Corner heights are shared by up to four columns; sample each once.
        let mut surface = Vec::with_capacity(columns * columns);
        for j in 0..columns {
            for i in 0..columns {
                let x = (coordinate.x * edge + i as i32) as f64;
                let y = (coordinate.y * edge + j as i32) as f64;
                surface.push(height(x, y));
            }
        }
        let at = |i: usize, j: usize| surface[i + j * columns];

        for k in 0..CELL_EDGE_SIZE {
            let floor = (coordinate.z * edge + k as i32) as f64;
            for j in 0..CELL_EDGE_SIZE {
                for i in 0..CELL_EDGE_SIZE {
                    let south_west = at(i, j);
                    let south_east = at(i + 1, j);
                    let north_west = at(i, j + 1);
                    let north_east = at(i + 1, j + 1);

                    let split =
                        (north_west - south_east).abs() <= (north_east - south_west).abs();

                    let shape = CubeShape::new(
                        quantize(north_east - floor),
                        quantize(north_west - floor),
                        quantize(south_east - floor),
                        quantize(south_west - floor),
                        split,
                    );

                    // quantize never leaves the valid range
                    if let Ok(shape) = shape {
                        cell.set_shape(i, j, k, shape);
                    }
                }
            }
        }

        debug!(
            "Filled cell {:?} with {} occupied cubes",
            coordinate,
            cell.occupied.count_ones()
        );

        cell
    }

    /// Fills a cell from 2D Perlin noise.
    pub fn perlin(coordinate: Point3<i32>, terrain: &TerrainConfig) -> Self {
        let perlin = Perlin::new(terrain.seed);
        Self::from_heightfield(coordinate, |x, y| {
            let sample = perlin.get([x * terrain.noise_scale, y * terrain.noise_scale]);
            terrain.base_height + sample * terrain.height_amplitude
        })
    }

    /// The shape of the level-0 cube at `(x, y, z)`; sky outside the cell.
    pub fn shape(&self, x: i32, y: i32, z: i32) -> CubeShape {
        match Self::offset(x, y, z) {
            Some(offset) => self.shapes[offset],
            None => CubeShape::SKY,
        }
    }

    /// Replaces the shape of the level-0 cube at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the position is outside the cell.
    pub fn set_shape(&mut self, x: usize, y: usize, z: usize, shape: CubeShape) {
        let offset = Self::offset(x as i32, y as i32, z as i32)
            .expect("cube position outside the cell");
        self.shapes[offset] = shape;
        self.occupied.set(offset, !shape.is_sky());
    }

    /// The shape a cube index stands for at its detail level.
    pub fn shape_at(&self, index: &CubeIndex) -> CubeShape {
        let scale = 1 << index.detail_level();
        let point = index.to_point();
        self.shape(point.x * scale, point.y * scale, point.z * scale)
    }

    /// Whether the cell holds nothing but sky.
    pub fn is_empty(&self) -> bool {
        self.occupied.not_any()
    }

    /// Number of cubes that are not sky.
    pub fn occupied_count(&self) -> usize {
        self.occupied.count_ones()
    }

    /// Lists every face that may need geometry at `detail_level`.
    ///
    /// A face is listed when the source cube has terrain touching it. Walls that
    /// back onto a solid neighbour are skipped since nothing can see them.
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidDetailLevel` if the level is out of range.
    pub fn faces(&self, detail_level: u8) -> Result<Vec<Face>, TerrainError> {
        let mut faces = Vec::new();
        let scale = 1 << detail_level;

        for index in CubeIndex::iter_level(detail_level)? {
            let point = index.to_point() * scale;
            if !self.is_occupied(point) {
                continue;
            }

            let source = self.shape(point.x, point.y, point.z);

            for direction in Direction::all() {
                if !source.has_face(direction) {
                    continue;
                }

                let adjacent = self.shape(
                    point.x + direction.value_on_axis(Axis::X) * scale,
                    point.y + direction.value_on_axis(Axis::Y) * scale,
                    point.z + direction.value_on_axis(Axis::Z) * scale,
                );

                if direction.is_lateral() && adjacent.is_solid() {
                    continue;
                }

                faces.push(Face {
                    index,
                    shape: FaceShape::new(source, adjacent, direction),
                });
            }
        }

        Ok(faces)
    }

    fn is_occupied(&self, point: Point3<i32>) -> bool {
        Self::offset(point.x, point.y, point.z)
            .map(|offset| self.occupied[offset])
            .unwrap_or(false)
    }

    fn offset(x: i32, y: i32, z: i32) -> Option<usize> {
        let edge = CELL_EDGE_SIZE as i32;
        if !(0..edge).contains(&x) || !(0..edge).contains(&y) || !(0..edge).contains(&z) {
            return None;
        }
        Some((x + edge * y + edge * edge * z) as usize)
    }
}

/// Quantizes a surface height measured from a cube's floor into a corner height.
fn quantize(relative: f64) -> CornerHeight {
    if relative < 0.0 {
        BELOW_CUBE_HEIGHT
    } else if relative >= 1.0 {
        CUBE_TOP_HEIGHT
    } else {
        let steps = (relative * HEIGHT_FRACTIONS as f64).floor() as CornerHeight;
        (CUBE_BOTTOM_HEIGHT + steps).min(HEIGHT_FRACTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_relative_heights() {
        assert_eq!(quantize(-0.01), BELOW_CUBE_HEIGHT);
        assert_eq!(quantize(0.0), CUBE_BOTTOM_HEIGHT);
        assert_eq!(quantize(0.5), 5);
        assert_eq!(quantize(0.999), HEIGHT_FRACTIONS);
        assert_eq!(quantize(1.0), CUBE_TOP_HEIGHT);
        assert_eq!(quantize(40.0), CUBE_TOP_HEIGHT);
    }

    #[test]
    fn offsets_match_packed_indices() {
        let mut index = CubeIndex::new(0).unwrap();
        index.set(5, 17, 30);
        assert_eq!(Cell::offset(5, 17, 30), Some(index.data() as usize));
        assert_eq!(Cell::offset(32, 0, 0), None);
        assert_eq!(Cell::offset(0, -1, 0), None);
    }

    #[test]
    fn flat_heightfield_fills_below_surface() {
        let cell = Cell::from_heightfield(Point3::new(0, 0, 0), |_, _| 3.5);

        assert!(cell.shape(4, 4, 0).is_solid());
        assert!(cell.shape(4, 4, 2).is_solid());
        assert_eq!(cell.shape(4, 4, 3), CubeShape::new(5, 5, 5, 5, true).unwrap());
        assert!(cell.shape(4, 4, 4).is_sky());
        assert!(cell.shape(4, 4, 40).is_sky());
        assert_eq!(cell.occupied_count(), 4 * CELL_EDGE_SIZE * CELL_EDGE_SIZE);
    }

    #[test]
    fn flat_terrain_has_slope_faces_and_outer_walls() {
        let cell = Cell::from_heightfield(Point3::new(0, 0, 0), |_, _| 3.5);
        let faces = cell.faces(0).unwrap();

        let slopes = faces
            .iter()
            .filter(|f| f.direction() == Direction::None)
            .count();
        assert_eq!(slopes, CELL_EDGE_SIZE * CELL_EDGE_SIZE);

        // Interior walls back onto solid or equal-height cubes; only walls on the
        // cell border face sky, or shorter neighbours in the surface layer.
        assert!(faces
            .iter()
            .filter(|f| f.direction().is_lateral())
            .all(|f| !f.shape.adjacent().is_solid()));
    }

    #[test]
    fn sky_cell_has_no_faces() {
        let cell = Cell::new(Point3::new(1, 2, 3));
        assert!(cell.is_empty());
        for level in 0..crate::map::CELL_DETAIL_LEVELS {
            assert!(cell.faces(level).unwrap().is_empty());
        }
    }

    #[test]
    fn coarse_levels_sample_minimum_corner() {
        let mut cell = Cell::new(Point3::new(0, 0, 0));
        let shape = CubeShape::new(5, 5, 5, 0, true).unwrap();
        cell.set_shape(8, 4, 12, shape);

        let mut index = CubeIndex::new(2).unwrap();
        index.set(2, 1, 3);
        assert_eq!(cell.shape_at(&index), shape);

        let faces = cell.faces(2).unwrap();
        assert!(faces.iter().all(|f| f.index == index));
        assert!(faces.iter().any(|f| f.direction() == Direction::None));
    }

    #[test]
    fn rejects_bad_detail_level() {
        let cell = Cell::new(Point3::new(0, 0, 0));
        assert!(cell.faces(crate::map::CELL_DETAIL_LEVELS).is_err());
    }
}
