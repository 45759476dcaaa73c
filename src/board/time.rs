//! The shared 54-cell time track.

use std::fmt;
use std::ops::Range;

use crate::core::PlayerId;

/// Flag set of a single time-board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellFlags(u8);

impl CellFlags {
    pub const EMPTY: CellFlags = CellFlags(0);
    pub const PLAYER_1: CellFlags = CellFlags(0b0001);
    pub const PLAYER_2: CellFlags = CellFlags(0b0010);
    pub const BUTTON_INCOME_TRIGGER: CellFlags = CellFlags(0b0100);
    pub const SPECIAL_PATCH: CellFlags = CellFlags(0b1000);

    /// The position flag of `player`.
    #[must_use]
    pub const fn player(player: PlayerId) -> CellFlags {
        if player.index() == 0 {
            Self::PLAYER_1
        } else {
            Self::PLAYER_2
        }
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: CellFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: CellFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: CellFlags) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for CellFlags {
    type Output = CellFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        CellFlags(self.0 | rhs.0)
    }
}

/// The time track shared by both players.
///
/// Each cell is a [`CellFlags`] set. Exactly one cell carries each player's
/// position flag; income triggers never change; special-patch flags are
/// removed when consumed and never come back.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimeBoard {
    cells: [CellFlags; TimeBoard::CELLS],
}

impl Default for TimeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeBoard {
    /// Number of cells on the track.
    pub const CELLS: usize = 54;
    /// The final cell; a player standing here has finished.
    pub const MAX_POSITION: u8 = 53;
    /// Cells that pay out button income when crossed.
    pub const BUTTON_INCOME_TRIGGER_CELLS: [u8; 9] = [5, 11, 17, 23, 29, 35, 41, 47, 53];
    /// Cells holding a special patch at game start.
    pub const SPECIAL_PATCH_CELLS: [u8; 5] = [26, 32, 38, 44, 50];

    /// The starting track: both tokens on cell 0.
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [CellFlags::EMPTY; Self::CELLS];
        cells[0] = CellFlags::PLAYER_1 | CellFlags::PLAYER_2;
        for index in Self::BUTTON_INCOME_TRIGGER_CELLS {
            cells[index as usize].insert(CellFlags::BUTTON_INCOME_TRIGGER);
        }
        for index in Self::SPECIAL_PATCH_CELLS {
            cells[index as usize].insert(CellFlags::SPECIAL_PATCH);
        }
        Self { cells }
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, index: u8) -> CellFlags {
        self.cells[Self::clamp(index as usize)]
    }

    /// The cell currently holding `player`'s flag.
    #[must_use]
    pub fn player_position(&self, player: PlayerId) -> u8 {
        let flag = CellFlags::player(player);
        self.cells
            .iter()
            .position(|cell| cell.contains(flag))
            .map_or(0, |index| index as u8)
    }

    /// Move `player`'s flag from `old` to `new` (clamped to the track).
    ///
    /// Both players may share a cell.
    pub fn set_player_position(&mut self, player: PlayerId, old: u8, new: u8) {
        let flag = CellFlags::player(player);
        self.cells[Self::clamp(old as usize)].remove(flag);
        self.cells[Self::clamp(new as usize)].insert(flag);
    }

    /// Number of income-trigger cells in `range` (half-open, clamped).
    #[must_use]
    pub fn button_income_triggers_in_range(&self, range: Range<usize>) -> usize {
        self.cells[Self::clamp_range(range)]
            .iter()
            .filter(|cell| cell.contains(CellFlags::BUTTON_INCOME_TRIGGER))
            .count()
    }

    /// Indices of special-patch cells in `range` (half-open, clamped), in
    /// track order.
    pub fn special_patches_in_range(&self, range: Range<usize>) -> impl Iterator<Item = u8> + '_ {
        let range = Self::clamp_range(range);
        let start = range.start;
        self.cells[range]
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.contains(CellFlags::SPECIAL_PATCH))
            .map(move |(offset, _)| (start + offset) as u8)
    }

    /// Remove the special patch at `index`. Irreversible.
    pub fn clear_special_patch(&mut self, index: u8) {
        self.cells[Self::clamp(index as usize)].remove(CellFlags::SPECIAL_PATCH);
    }

    /// Special patches still on the track.
    #[must_use]
    pub fn special_patches_remaining(&self) -> usize {
        self.special_patches_in_range(0..Self::CELLS).count()
    }

    #[inline]
    fn clamp(index: usize) -> usize {
        index.min(Self::MAX_POSITION as usize)
    }

    /// Clamp both endpoints into `0..=CELLS`; `start > end` becomes empty.
    fn clamp_range(range: Range<usize>) -> Range<usize> {
        let end = range.end.min(Self::CELLS);
        let start = range.start.min(end);
        start..end
    }
}

impl fmt::Display for TimeBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            let symbol = match (
                cell.contains(CellFlags::PLAYER_1),
                cell.contains(CellFlags::PLAYER_2),
            ) {
                (true, true) => '*',
                (true, false) => '1',
                (false, true) => '2',
                _ if cell.contains(CellFlags::SPECIAL_PATCH) => 'S',
                _ if cell.contains(CellFlags::BUTTON_INCOME_TRIGGER) => '$',
                _ => '.',
            };
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_flags() {
        let mut flags = CellFlags::PLAYER_1 | CellFlags::SPECIAL_PATCH;
        assert!(flags.contains(CellFlags::PLAYER_1));
        assert!(!flags.contains(CellFlags::PLAYER_2));
        flags.remove(CellFlags::SPECIAL_PATCH);
        assert_eq!(flags, CellFlags::PLAYER_1);
        flags.insert(CellFlags::PLAYER_2);
        assert_eq!(flags.bits(), 0b0011);
    }

    #[test]
    fn test_initial_board() {
        let board = TimeBoard::new();
        assert_eq!(board.player_position(PlayerId::PLAYER_1), 0);
        assert_eq!(board.player_position(PlayerId::PLAYER_2), 0);
        assert_eq!(board.button_income_triggers_in_range(0..54), 9);
        assert_eq!(board.special_patches_remaining(), 5);
    }

    #[test]
    fn test_set_player_position() {
        let mut board = TimeBoard::new();
        board.set_player_position(PlayerId::PLAYER_1, 0, 7);
        assert_eq!(board.player_position(PlayerId::PLAYER_1), 7);
        assert_eq!(board.player_position(PlayerId::PLAYER_2), 0);
        assert!(!board.cell(0).contains(CellFlags::PLAYER_1));

        // clamps past the end
        board.set_player_position(PlayerId::PLAYER_1, 7, 60);
        assert_eq!(board.player_position(PlayerId::PLAYER_1), 53);
    }

    #[test]
    fn test_income_triggers_in_range() {
        let board = TimeBoard::new();
        assert_eq!(board.button_income_triggers_in_range(1..6), 1);
        assert_eq!(board.button_income_triggers_in_range(1..5), 0);
        assert_eq!(board.button_income_triggers_in_range(4..12), 2);
        assert_eq!(board.button_income_triggers_in_range(50..100), 1);
        assert_eq!(board.button_income_triggers_in_range(12..6), 0);
    }

    #[test]
    fn test_special_patches_consumed_once() {
        let mut board = TimeBoard::new();
        let found: Vec<_> = board.special_patches_in_range(20..40).collect();
        assert_eq!(found, vec![26, 32, 38]);

        board.clear_special_patch(26);
        let found: Vec<_> = board.special_patches_in_range(20..30).collect();
        assert!(found.is_empty());
        assert_eq!(board.special_patches_remaining(), 4);
    }
}
