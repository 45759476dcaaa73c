//! A player's 9×9 quilt board.

use std::fmt;

use crate::core::Action;
use crate::patch::{Patch, Shape, Transformation};

/// A legal position for one transform of a patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub transformation: Transformation,
    pub row: u8,
    pub column: u8,
}

/// A player's private placement grid.
///
/// Tiles are a `u128` bitboard (bit `row * 9 + column`). `tiles_filled` and
/// `is_full` are cached alongside and kept in sync by [`QuiltBoard::add_patch`],
/// the only mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuiltBoard {
    tiles: u128,
    tiles_filled: u8,
    is_full: bool,
    button_income: u32,
}

impl Default for QuiltBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl QuiltBoard {
    pub const ROWS: u8 = 9;
    pub const COLUMNS: u8 = 9;
    pub const TILES: u8 = Self::ROWS * Self::COLUMNS;

    /// An empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tiles: 0,
            tiles_filled: 0,
            is_full: false,
            button_income: 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn tiles(&self) -> u128 {
        self.tiles
    }

    #[inline]
    #[must_use]
    pub const fn get(&self, row: u8, column: u8) -> bool {
        self.tiles & (1u128 << (row as u32 * Self::COLUMNS as u32 + column as u32)) != 0
    }

    #[inline]
    #[must_use]
    pub const fn tiles_filled(&self) -> u32 {
        self.tiles_filled as u32
    }

    #[inline]
    #[must_use]
    pub const fn tiles_free(&self) -> u32 {
        Self::TILES as u32 - self.tiles_filled as u32
    }

    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.is_full
    }

    /// Sum of the income bonuses of all placed patches.
    #[inline]
    #[must_use]
    pub const fn button_income(&self) -> u32 {
        self.button_income
    }

    /// Fraction of filled tiles in `[0, 1]`.
    #[must_use]
    pub fn fill_fraction(&self) -> f64 {
        f64::from(self.tiles_filled) / f64::from(Self::TILES)
    }

    /// `-2` per empty tile.
    #[inline]
    #[must_use]
    pub const fn score(&self) -> i32 {
        -2 * self.tiles_free() as i32
    }

    /// Whether `shape` fits at `(row, column)`: inside the board and without
    /// sharing a single tile with what is already placed.
    #[must_use]
    pub fn is_valid_placement(&self, shape: &Shape, row: u8, column: u8) -> bool {
        u32::from(row) + u32::from(shape.rows()) <= u32::from(Self::ROWS)
            && u32::from(column) + u32::from(shape.columns()) <= u32::from(Self::COLUMNS)
            && self.tiles & shape.mask_at(row, column) == 0
    }

    /// Every legal `(transform, offset)` for `patch`.
    ///
    /// Slides each unique transform's bounding box over all in-bounds
    /// top-left offsets and keeps those whose mask does not intersect the
    /// board.
    pub fn placements<'a>(&'a self, patch: &'a Patch) -> impl Iterator<Item = Placement> + 'a {
        let tiles = self.tiles;
        let skip = self.is_full;
        patch
            .unique_transformations()
            .iter()
            .filter(move |_| !skip)
            .flat_map(move |transformed| {
                let shape = transformed.shape;
                let transformation = transformed.transformation;
                (0..=Self::ROWS - shape.rows()).flat_map(move |row| {
                    (0..=Self::COLUMNS - shape.columns()).filter_map(move |column| {
                        (tiles & shape.mask_at(row, column) == 0).then_some(Placement {
                            transformation,
                            row,
                            column,
                        })
                    })
                })
            })
    }

    /// Placement actions for a patch taken from purchase slot `slot`.
    #[must_use]
    pub fn valid_actions_for_patch(&self, patch: &Patch, slot: u8) -> Vec<Action> {
        self.placements(patch)
            .map(|p| Action::PatchPlacement {
                slot,
                patch_id: patch.id,
                transformation: p.transformation,
                row: p.row,
                column: p.column,
            })
            .collect()
    }

    /// Placement actions for the pending special patch: every empty tile.
    #[must_use]
    pub fn valid_actions_for_special_patch(&self, patch: &Patch) -> Vec<Action> {
        self.placements(patch)
            .map(|p| Action::SpecialPatchPlacement {
                patch_id: patch.id,
                row: p.row,
                column: p.column,
            })
            .collect()
    }

    /// OR a patch into the board.
    ///
    /// The caller guarantees that the placement came from
    /// [`QuiltBoard::placements`] (or passed [`QuiltBoard::is_valid_placement`]);
    /// this is not re-checked in release builds.
    pub fn add_patch(&mut self, shape: &Shape, button_income: u8, row: u8, column: u8) {
        debug_assert!(self.is_valid_placement(shape, row, column));
        self.tiles |= shape.mask_at(row, column);
        self.tiles_filled += shape.tile_count() as u8;
        self.button_income += u32::from(button_income);
        self.is_full = self.tiles_filled == Self::TILES;
    }
}

impl fmt::Display for QuiltBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..Self::ROWS {
            for column in 0..Self::COLUMNS {
                f.write_str(if self.get(row, column) { "█" } else { "░" })?;
            }
            writeln!(f)?;
        }
        write!(f, "Button income: {}", self.button_income)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::PatchCatalog;

    #[test]
    fn test_empty_board() {
        let board = QuiltBoard::new();
        assert_eq!(board.tiles_filled(), 0);
        assert_eq!(board.tiles_free(), 81);
        assert!(!board.is_full());
        assert_eq!(board.score(), -162);
        assert_eq!(board.fill_fraction(), 0.0);
    }

    #[test]
    fn test_add_patch_updates_counters() {
        let mut board = QuiltBoard::new();
        let patch = PatchCatalog::patch(1);
        board.add_patch(patch.shape(), patch.button_income, 2, 3);

        assert_eq!(board.tiles_filled(), 5);
        assert_eq!(board.tiles().count_ones(), 5);
        assert_eq!(board.button_income(), 3);
        assert_eq!(board.score(), -2 * 76);
        assert!(board.get(2, 3));
        assert!(board.get(4, 5));
        assert!(!board.get(2, 4));
    }

    #[test]
    fn test_is_valid_placement_bounds_and_overlap() {
        let mut board = QuiltBoard::new();
        let line = PatchCatalog::patch(27).shape(); // 1x5
        assert!(board.is_valid_placement(line, 8, 4));
        assert!(!board.is_valid_placement(line, 8, 5));

        board.add_patch(line, 0, 0, 0);
        assert!(!board.is_valid_placement(line, 0, 4));
        assert!(board.is_valid_placement(line, 1, 0));
    }

    #[test]
    fn test_is_valid_placement_far_off_board() {
        let board = QuiltBoard::new();
        let line = PatchCatalog::patch(27).shape();
        assert!(!board.is_valid_placement(line, 255, 0));
        assert!(!board.is_valid_placement(line, 0, 255));
        assert!(!board.is_valid_placement(line, 252, 252));
    }

    #[test]
    fn test_placements_on_empty_board() {
        let board = QuiltBoard::new();
        // 2x2 square: one transform, 8x8 offsets
        assert_eq!(board.placements(PatchCatalog::patch(9)).count(), 64);
        // 1x5 line: two transforms, 9*5 offsets each
        assert_eq!(board.placements(PatchCatalog::patch(27)).count(), 90);
        // special patch: every tile
        assert_eq!(board.placements(PatchCatalog::special_patch(0)).count(), 81);
    }

    #[test]
    fn test_placements_respect_filled_tiles() {
        let mut board = QuiltBoard::new();
        let special = PatchCatalog::special_patch(0);
        board.add_patch(special.shape(), 0, 4, 4);

        let placements: Vec<_> = board.placements(special).collect();
        assert_eq!(placements.len(), 80);
        assert!(!placements.iter().any(|p| p.row == 4 && p.column == 4));
    }

    #[test]
    fn test_full_board() {
        let mut board = QuiltBoard::new();
        let special = PatchCatalog::special_patch(0);
        for row in 0..9 {
            for column in 0..9 {
                assert!(!board.is_full());
                board.add_patch(special.shape(), 0, row, column);
            }
        }
        assert!(board.is_full());
        assert_eq!(board.score(), 0);
        assert_eq!(board.placements(special).count(), 0);
        assert!(board.valid_actions_for_special_patch(special).is_empty());
    }

    #[test]
    fn test_valid_actions_carry_slot() {
        let board = QuiltBoard::new();
        let patch = PatchCatalog::patch(25);
        let actions = board.valid_actions_for_patch(patch, 2);
        assert!(!actions.is_empty());
        assert!(actions.iter().all(|a| a.id().patch_slot() == Some(2)));
    }
}
