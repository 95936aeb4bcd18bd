//! # Cube Index Module
//!
//! A `CubeIndex` addresses one cube inside a cell with a single packed 16-bit word.
//!
//! ## Bit Layout
//!
//! Each axis takes `shift` bits, where `shift = CELL_DETAIL_LEVELS - detail_level - 1`.
//! At detail level 0 this is 5 bits per axis:
//!
//! ```text
//! bit   15 | 14 .. 10 | 9 .. 5 | 4 .. 0
//!        0 |  ZZZZZ   | YYYYY  | XXXXX
//! ```
//!
//! Coarser detail levels use fewer bits per axis, so the same cell is covered by
//! fewer, larger cubes. The packed word itself never changes meaning between
//! levels; callers re-derive it when switching.
//!
//! ## Enumeration
//!
//! Starting from zero and calling `next()` until `end()` visits every packed
//! value from 0 to `max`. Because the axis fields have no gaps above `mask`,
//! this is ordinary mixed-radix counting: X fastest, then Y, then Z.

use std::hash::{Hash, Hasher};

use cgmath::Point3;

use crate::error::TerrainError;

use super::{
    direction::{Axis, Direction},
    CELL_DETAIL_LEVELS,
};

/// A packed cube coordinate inside a cell at a given detail level.
#[derive(Copy, Clone, Debug)]
pub struct CubeIndex {
    data: i16,
    detail_level: u8,
    shift: u8,
    size: i16,
    mask: i16,
    max: i16,
}

impl CubeIndex {
    /// Creates an index at the origin of the cell.
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidDetailLevel` if `detail_level >= CELL_DETAIL_LEVELS`.
    pub fn new(detail_level: u8) -> Result<Self, TerrainError> {
        Self::with_data(detail_level, 0)
    }

    /// Creates an index from an already packed value.
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidDetailLevel` if `detail_level >= CELL_DETAIL_LEVELS`.
    pub fn with_data(detail_level: u8, data: i16) -> Result<Self, TerrainError> {
        let mut index = CubeIndex {
            data,
            detail_level: 0,
            shift: 0,
            size: 0,
            mask: 0,
            max: 0,
        };
        index.set_detail_level(detail_level)?;
        Ok(index)
    }

    /// Recomputes the field widths for a new detail level.
    ///
    /// The packed value is left untouched; it is not rescaled to the new level.
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidDetailLevel` if `detail_level >= CELL_DETAIL_LEVELS`,
    /// leaving the index unchanged.
    pub fn set_detail_level(&mut self, detail_level: u8) -> Result<(), TerrainError> {
        if detail_level >= CELL_DETAIL_LEVELS {
            return Err(TerrainError::InvalidDetailLevel(detail_level));
        }

        self.detail_level = detail_level;
        self.shift = CELL_DETAIL_LEVELS - detail_level - 1;
        self.size = 1 << self.shift;
        self.mask = self.size - 1;

        let x = self.place(self.mask, 0);
        let y = self.place(self.mask, 1);
        let z = self.place(self.mask, 2);
        self.max = x | y | z;

        Ok(())
    }

    /// The raw packed word.
    pub fn data(&self) -> i16 {
        self.data
    }

    /// The detail level the fields are laid out for.
    pub fn detail_level(&self) -> u8 {
        self.detail_level
    }

    /// Bits per axis field.
    pub fn shift(&self) -> u8 {
        self.shift
    }

    /// Number of cubes along each axis at this detail level.
    pub fn size(&self) -> i16 {
        self.size
    }

    /// Mask selecting one axis field once shifted down.
    pub fn mask(&self) -> i16 {
        self.mask
    }

    /// Largest valid packed value at this detail level.
    pub fn max(&self) -> i16 {
        self.max
    }

    /// Sets all three axes, silently masking each to the field width.
    pub fn set(&mut self, x: i32, y: i32, z: i32) {
        let mask = self.mask as i32;
        self.pack((x & mask) as i16, (y & mask) as i16, (z & mask) as i16);
    }

    /// Sets a single axis, silently masking the value to the field width.
    pub fn set_axis(&mut self, axis: Axis, value: i32) {
        let (mut x, mut y, mut z) = self.unpack();
        let value = (value & self.mask as i32) as i16;

        match axis {
            Axis::X => x = value,
            Axis::Y => y = value,
            Axis::Z => z = value,
        }

        self.pack(x, y, z);
    }

    /// The X component.
    pub fn x(&self) -> i16 {
        self.field(0)
    }

    /// The Y component.
    pub fn y(&self) -> i16 {
        self.field(1)
    }

    /// The Z component.
    pub fn z(&self) -> i16 {
        self.field(2)
    }

    /// The component along `axis`.
    pub fn value_on_axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x(),
            Axis::Y => self.y(),
            Axis::Z => self.z(),
        }
    }

    /// The decoded coordinates as a point.
    pub fn to_point(&self) -> Point3<i32> {
        Point3::new(self.x() as i32, self.y() as i32, self.z() as i32)
    }

    /// Steps one cube along `direction`, then applies the roll-over rule.
    ///
    /// A component whose quotient by `size` is zero is treated as rolled over:
    /// X is cleared and carried into Y, Y likewise into Z, and Z is cleared.
    /// Components left over are packed without masking.
    pub fn translate(&mut self, direction: Direction) {
        let (mut x, mut y, mut z) = self.unpack();

        x = (x as i32 + direction.value_on_axis(Axis::X)) as i16;
        y = (y as i32 + direction.value_on_axis(Axis::Y)) as i16;
        z = (z as i32 + direction.value_on_axis(Axis::Z)) as i16;

        // TODO: the roll-over test fires for every in-range component; switch to
        // `>= size` once callers relying on the current stepping are audited.
        if x / self.size == 0 {
            x = 0;
            y = y.wrapping_add(1);
            if y / self.size == 0 {
                y = 0;
                z = z.wrapping_add(1);
                if z / self.size == 0 {
                    z = 0;
                }
            }
        }

        self.pack(x, y, z);
    }

    /// Steps `length` cubes along `direction`, wrapping each axis modulo `size`.
    ///
    /// The remainder keeps the sign of the dividend, so a negative step past the
    /// origin yields a negative component and a packed value for which `end()` is true.
    pub fn translate_by(&mut self, direction: Direction, length: i32) {
        let (x, y, z) = self.unpack();
        let size = self.size as i32;

        let x = (x as i32 + direction.value_on_axis(Axis::X) * length) as i16;
        let y = (y as i32 + direction.value_on_axis(Axis::Y) * length) as i16;
        let z = (z as i32 + direction.value_on_axis(Axis::Z) * length) as i16;

        self.pack(
            (x as i32 % size) as i16,
            (y as i32 % size) as i16,
            (z as i32 % size) as i16,
        );
    }

    /// Advances the packed word by one.
    pub fn next(&mut self) {
        self.data = self.data.wrapping_add(1);
    }

    /// True once the packed word has run past `max` or wrapped negative.
    pub fn end(&self) -> bool {
        self.data > self.max || self.data < 0
    }

    /// Copies the packed value and detail level of another index.
    pub fn copy_from(&mut self, other: &CubeIndex) {
        *self = *other;
    }

    /// A lazy enumeration of every cube at `detail_level`, from zero to `max`.
    ///
    /// # Errors
    /// Returns `TerrainError::InvalidDetailLevel` if `detail_level >= CELL_DETAIL_LEVELS`.
    pub fn iter_level(detail_level: u8) -> Result<CubeIndexIter, TerrainError> {
        Ok(CubeIndexIter {
            cursor: CubeIndex::new(detail_level)?,
        })
    }

    fn field(&self, slot: u8) -> i16 {
        ((self.data as i32 >> (self.shift * slot)) & self.mask as i32) as i16
    }

    fn unpack(&self) -> (i16, i16, i16) {
        (self.field(0), self.field(1), self.field(2))
    }

    fn place(&self, component: i16, slot: u8) -> i16 {
        ((component as i32) << (self.shift * slot)) as i16
    }

    fn pack(&mut self, x: i16, y: i16, z: i16) {
        let x = self.place(x, 0);
        let y = self.place(y, 1);
        let z = self.place(z, 2);
        self.data = x | y | z;
    }
}

impl PartialEq for CubeIndex {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.detail_level == other.detail_level
    }
}

impl Eq for CubeIndex {}

impl Hash for CubeIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

/// Iterator over every cube index at one detail level.
///
/// Driven by `CubeIndex::next` and `CubeIndex::end`; restart by calling
/// `CubeIndex::iter_level` again.
pub struct CubeIndexIter {
    cursor: CubeIndex,
}

impl Iterator for CubeIndexIter {
    type Item = CubeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.end() {
            return None;
        }

        let current = self.cursor;
        self.cursor.next();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.cursor.end() {
            0
        } else {
            (self.cursor.max as i32 - self.cursor.data as i32 + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CubeIndexIter {}
