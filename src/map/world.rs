//! # World Module
//!
//! The `World` owns every cell that has been filled so far, keyed by cell
//! coordinate. Cells are wrapped in `MtResource` so a cell filled on one worker
//! can be meshed on another without copying its shape array.
//!
//! ## Terrain
//!
//! New cells are filled from the Perlin heightfield in the world's
//! `TerrainConfig`, so a cell at a given coordinate always gets the same shapes
//! for the same seed.

use std::collections::HashMap;

use cgmath::Point3;
use log::debug;

use crate::{config::TerrainConfig, core::MtResource};

use super::cell::Cell;

/// A sparse grid of cells.
pub struct World {
    /// Cells by cell coordinate
    pub cells: HashMap<Point3<i32>, MtResource<Cell>>,
    terrain: TerrainConfig,
}

impl World {
    /// Creates a world with no cells.
    ///
    /// # Arguments
    /// * `terrain` - Heightfield parameters for cells added later
    pub fn new(terrain: TerrainConfig) -> Self {
        World {
            cells: HashMap::new(),
            terrain,
        }
    }

    /// The heightfield parameters new cells are filled from.
    pub fn terrain(&self) -> &TerrainConfig {
        &self.terrain
    }

    /// Fills and stores the cell at `position`, unless it already exists.
    ///
    /// # Returns
    /// The stored cell
    pub fn add_cell_at(&mut self, position: Point3<i32>) -> MtResource<Cell> {
        let terrain = &self.terrain;
        self.cells
            .entry(position)
            .or_insert_with(|| {
                debug!("Filling cell {:?}", position);
                MtResource::new(Cell::perlin(position, terrain))
            })
            .clone()
    }

    /// Stores an already filled cell unless its coordinate is taken.
    ///
    /// # Returns
    /// The stored cell, which is the earlier one if two fills raced
    pub fn insert_cell(&mut self, cell: Cell) -> MtResource<Cell> {
        self.cells
            .entry(cell.coordinate)
            .or_insert_with(|| MtResource::new(cell))
            .clone()
    }

    /// The cell at `position`, if it has been added.
    pub fn get_cell_at(&self, position: Point3<i32>) -> Option<MtResource<Cell>> {
        self.cells.get(&position).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_each_cell_once() {
        let mut world = World::new(TerrainConfig::default());
        let first = world.add_cell_at(Point3::new(0, 0, 0));
        let again = world.add_cell_at(Point3::new(0, 0, 0));

        assert_eq!(world.cells.len(), 1);
        assert_eq!(first.handle_count(), 3);
        drop(again);
        assert!(world.get_cell_at(Point3::new(0, 0, 0)).is_some());
        assert!(world.get_cell_at(Point3::new(1, 0, 0)).is_none());
    }

    #[test]
    fn racing_fills_keep_the_first_cell() {
        let mut world = World::new(TerrainConfig::default());
        let position = Point3::new(2, 0, 0);

        let first = world.insert_cell(Cell::from_heightfield(position, |_, _| 4.0));
        let second = world.insert_cell(Cell::from_heightfield(position, |_, _| 9.0));

        assert_eq!(world.cells.len(), 1);
        assert_eq!(first.handle_count(), 3);
        drop(second);
        let stored = world.get_cell_at(position).unwrap();
        assert_eq!(stored.get().shape(0, 0, 4), first.get().shape(0, 0, 4));
        assert!(stored.get().shape(0, 0, 8).is_sky());
    }

    #[test]
    fn same_seed_fills_same_cells() {
        let mut a = World::new(TerrainConfig::default());
        let mut b = World::new(TerrainConfig::default());
        let pa = a.add_cell_at(Point3::new(1, -1, 0));
        let pb = b.add_cell_at(Point3::new(1, -1, 0));

        let (ca, cb) = (pa.get(), pb.get());
        for z in 0..32 {
            assert_eq!(ca.shape(3, 7, z), cb.shape(3, 7, z));
        }
        assert_eq!(ca.occupied_count(), cb.occupied_count());
    }
}
