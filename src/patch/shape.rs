//! Patch geometry: tile masks and their rotations/reflections.
//!
//! A [`Shape`] stores its tiles as a `u128` laid out with the quilt board's
//! row stride, anchored at the top-left corner. Placing a shape at
//! `(row, column)` is then a single shift, and an overlap test against a
//! quilt board is a single AND.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::QuiltBoard;

const STRIDE: u32 = QuiltBoard::COLUMNS as u32;

/// Rotation of a patch in quarter turns (counter-clockwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Zero = 0,
    Ninety = 1,
    OneEighty = 2,
    TwoSeventy = 3,
}

impl Rotation {
    /// All rotations in ascending order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Zero,
        Rotation::Ninety,
        Rotation::OneEighty,
        Rotation::TwoSeventy,
    ];

    /// Number of quarter turns.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// Rotation from a quarter-turn count (taken modulo 4).
    #[must_use]
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::Zero,
            1 => Rotation::Ninety,
            2 => Rotation::OneEighty,
            _ => Rotation::TwoSeventy,
        }
    }
}

/// Whether a patch is placed face up or mirrored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Normal = 0,
    Flipped = 1,
}

/// A rotation combined with an orientation.
///
/// The flip (row reversal) is applied before the rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transformation {
    pub rotation: Rotation,
    pub orientation: Orientation,
}

impl Transformation {
    /// The untransformed patch.
    pub const IDENTITY: Transformation = Transformation::new(Rotation::Zero, Orientation::Normal);

    /// All eight transformations, normal orientation first.
    pub const ALL: [Transformation; 8] = [
        Transformation::new(Rotation::Zero, Orientation::Normal),
        Transformation::new(Rotation::Ninety, Orientation::Normal),
        Transformation::new(Rotation::OneEighty, Orientation::Normal),
        Transformation::new(Rotation::TwoSeventy, Orientation::Normal),
        Transformation::new(Rotation::Zero, Orientation::Flipped),
        Transformation::new(Rotation::Ninety, Orientation::Flipped),
        Transformation::new(Rotation::OneEighty, Orientation::Flipped),
        Transformation::new(Rotation::TwoSeventy, Orientation::Flipped),
    ];

    #[must_use]
    pub const fn new(rotation: Rotation, orientation: Orientation) -> Self {
        Self {
            rotation,
            orientation,
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orientation = match self.orientation {
            Orientation::Normal => "normal",
            Orientation::Flipped => "flipped",
        };
        write!(f, "{}° {}", self.rotation.quarter_turns() as u32 * 90, orientation)
    }
}

/// A tile mask of at most 5×5 cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: u8,
    columns: u8,
    mask: u128,
}

impl Shape {
    /// Build a shape from text rows, `X` marking a filled tile.
    ///
    /// ```
    /// use patchwork::patch::Shape;
    ///
    /// let l = Shape::from_rows(&["X.", "XX"]);
    /// assert_eq!(l.rows(), 2);
    /// assert_eq!(l.columns(), 2);
    /// assert_eq!(l.tile_count(), 3);
    /// assert!(!l.get(0, 1));
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.first().map_or(0, |r| r.len());
        let mut shape = Self::empty(rows.len() as u8, columns as u8);
        for (row, line) in rows.iter().enumerate() {
            debug_assert_eq!(line.len(), columns, "ragged patch definition");
            for (column, tile) in line.bytes().enumerate() {
                if tile == b'X' {
                    shape.set(row as u8, column as u8);
                }
            }
        }
        shape
    }

    fn empty(rows: u8, columns: u8) -> Self {
        Self {
            rows,
            columns,
            mask: 0,
        }
    }

    fn set(&mut self, row: u8, column: u8) {
        self.mask |= 1u128 << (row as u32 * STRIDE + column as u32);
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// The raw mask anchored at the top-left board cell.
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> u128 {
        self.mask
    }

    /// The mask shifted to the given top-left board offset.
    #[inline]
    #[must_use]
    pub const fn mask_at(&self, row: u8, column: u8) -> u128 {
        self.mask << (row as u32 * STRIDE + column as u32)
    }

    #[inline]
    #[must_use]
    pub const fn tile_count(&self) -> u32 {
        self.mask.count_ones()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: u8, column: u8) -> bool {
        row < self.rows
            && column < self.columns
            && self.mask & (1u128 << (row as u32 * STRIDE + column as u32)) != 0
    }

    /// Filled cells as `(row, column)` pairs, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |column| (row, column)))
            .filter(move |&(row, column)| self.get(row, column))
    }

    /// Rotate a quarter turn counter-clockwise.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut rotated = Self::empty(self.columns, self.rows);
        for (row, column) in self.cells() {
            rotated.set(self.columns - 1 - column, row);
        }
        rotated
    }

    /// Mirror the rows (top becomes bottom).
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut flipped = Self::empty(self.rows, self.columns);
        for (row, column) in self.cells() {
            flipped.set(self.rows - 1 - row, column);
        }
        flipped
    }

    /// Apply a transformation: flip first, then rotate.
    #[must_use]
    pub fn transformed(&self, transformation: Transformation) -> Self {
        let mut shape = match transformation.orientation {
            Orientation::Normal => *self,
            Orientation::Flipped => self.flipped(),
        };
        for _ in 0..transformation.rotation.quarter_turns() {
            shape = shape.rotated();
        }
        shape
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                f.write_str(if self.get(row, column) { "█" } else { " " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let shape = Shape::from_rows(&["XX.", ".XX"]);
        assert_eq!(shape.rows(), 2);
        assert_eq!(shape.columns(), 3);
        assert_eq!(shape.tile_count(), 4);
        assert!(shape.get(0, 0));
        assert!(!shape.get(0, 2));
        assert!(shape.get(1, 2));
        assert!(!shape.get(2, 0));
    }

    #[test]
    fn test_mask_uses_board_stride() {
        let shape = Shape::from_rows(&["X", "X"]);
        assert_eq!(shape.mask(), 1 | (1 << 9));
        assert_eq!(shape.mask_at(1, 2), (1 << 11) | (1 << 20));
    }

    #[test]
    fn test_rotation_counter_clockwise() {
        // X..      .X
        // XXX  ->  .X
        //          XX
        let shape = Shape::from_rows(&["X..", "XXX"]);
        let rotated = shape.rotated();
        assert_eq!(rotated, Shape::from_rows(&[".X", ".X", "XX"]));
    }

    #[test]
    fn test_four_rotations_is_identity() {
        let shape = Shape::from_rows(&[".XX", "XX.", ".X."]);
        let full_turn = shape.rotated().rotated().rotated().rotated();
        assert_eq!(shape, full_turn);
    }

    #[test]
    fn test_flip_reverses_rows() {
        let shape = Shape::from_rows(&["X..", "XXX"]);
        assert_eq!(shape.flipped(), Shape::from_rows(&["XXX", "X.."]));
        assert_eq!(shape.flipped().flipped(), shape);
    }

    #[test]
    fn test_transformed_flips_before_rotating() {
        let shape = Shape::from_rows(&["X..", "XXX"]);
        let transformation = Transformation::new(Rotation::Ninety, Orientation::Flipped);
        assert_eq!(shape.transformed(transformation), shape.flipped().rotated());
        assert_eq!(shape.transformed(Transformation::IDENTITY), shape);
    }

    #[test]
    fn test_cells_row_major() {
        let shape = Shape::from_rows(&[".X", "X."]);
        let cells: Vec<_> = shape.cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_transformation_display() {
        let transformation = Transformation::new(Rotation::TwoSeventy, Orientation::Flipped);
        assert_eq!(transformation.to_string(), "270° flipped");
    }
}
