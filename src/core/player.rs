//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Type-safe identifier for the two seats. Player 1 always moves first.
//!
//! ## PlayerState
//!
//! A seat's position on the time board, its button balance and its quilt.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::board::QuiltBoard;

/// One of the two seats.
///
/// Indices are 0-based: player 1 is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const PLAYER_1: PlayerId = PlayerId(0);
    pub const PLAYER_2: PlayerId = PlayerId(1);

    /// Both seats in turn order.
    pub const ALL: [PlayerId; 2] = [Self::PLAYER_1, Self::PLAYER_2];

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The opponent.
    ///
    /// ```
    /// use patchwork::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::PLAYER_1.other(), PlayerId::PLAYER_2);
    /// assert_eq!(PlayerId::PLAYER_2.other(), PlayerId::PLAYER_1);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        PlayerId(1 - self.0)
    }

    #[must_use]
    pub const fn is_player_1(self) -> bool {
        self.0 == 0
    }

    /// `1.0` for player 1 and `-1.0` for player 2; orients values that are
    /// expressed from player 1's point of view.
    #[must_use]
    pub const fn sign(self) -> f64 {
        if self.is_player_1() {
            1.0
        } else {
            -1.0
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// A seat's mutable game data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerState {
    /// Display name.
    pub name: Arc<str>,
    /// Time-board cell, mirrored by the flag on the time board.
    pub position: u8,
    /// Buttons available for purchases.
    pub button_balance: i32,
    pub quilt_board: QuiltBoard,
}

impl PlayerState {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, position: u8, button_balance: i32) -> Self {
        Self {
            name: name.into(),
            position,
            button_balance,
            quilt_board: QuiltBoard::new(),
        }
    }

    /// End-of-game score: quilt penalty plus buttons.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.quilt_board.score() + self.button_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::PLAYER_1.index(), 0);
        assert_eq!(PlayerId::PLAYER_2.index(), 1);
        assert_eq!(PlayerId::PLAYER_1.other().other(), PlayerId::PLAYER_1);
        assert!(PlayerId::PLAYER_1.is_player_1());
        assert_eq!(PlayerId::PLAYER_2.sign(), -1.0);
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(format!("{}", PlayerId::PLAYER_1), "Player 1");
        assert_eq!(format!("{}", PlayerId::PLAYER_2), "Player 2");
    }

    #[test]
    fn test_player_state_score() {
        let state = PlayerState::new("Alice", 0, 5);
        assert_eq!(state.score(), -162 + 5);
        assert_eq!(&*state.name, "Alice");
    }
}
