//! Game state: the full snapshot a decision is made from.
//!
//! ## GameState
//!
//! - Purchase queue (patch ids, first three are visible)
//! - Time board
//! - Both player states
//! - Active player
//! - Pending special-patch placement, if any
//!
//! States are values. The engine clones before every transition and never
//! touches the input, so search trees can hold thousands of divergent
//! snapshots. The queue is an `im::Vector`, which makes the clone O(1) and
//! shares structure with the parent; everything else is small and `Copy`-like.

use im::Vector;

use super::player::{PlayerId, PlayerState};
use crate::board::TimeBoard;
use crate::patch::{Patch, PatchCatalog};

/// A complete game snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Remaining purchasable patch ids; the first three are buyable.
    pub patches: Vector<u8>,

    pub time_board: TimeBoard,

    /// Indexed by [`PlayerId::index`].
    pub players: [PlayerState; 2],

    /// The player to move.
    pub current_player: PlayerId,

    /// Time-board cell of a consumed special patch that the current player
    /// must place before normal turns resume.
    pub special_patch_placement: Option<u8>,
}

impl GameState {
    /// Number of patches that can be bought at once.
    pub const VISIBLE_PATCHES: usize = 3;

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player.index()]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player.index()]
    }

    /// State of the player to move.
    #[must_use]
    pub fn current(&self) -> &PlayerState {
        self.player(self.current_player)
    }

    /// State of the player waiting.
    #[must_use]
    pub fn other(&self) -> &PlayerState {
        self.player(self.current_player.other())
    }

    /// The buyable patches with their purchase slot.
    pub fn visible_patches(&self) -> impl Iterator<Item = (u8, &'static Patch)> + '_ {
        self.patches
            .iter()
            .take(Self::VISIBLE_PATCHES)
            .enumerate()
            .map(|(slot, &id)| (slot as u8, PatchCatalog::patch(id)))
    }

    /// The special patch awaiting placement.
    #[must_use]
    pub fn pending_special_patch(&self) -> Option<&'static Patch> {
        let cell = self.special_patch_placement?;
        let ordinal = TimeBoard::SPECIAL_PATCH_CELLS
            .iter()
            .position(|&c| c == cell)?;
        Some(PatchCatalog::special_patch(ordinal))
    }

    /// Whether both players have reached the final cell.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.players
            .iter()
            .all(|p| p.position >= TimeBoard::MAX_POSITION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        GameState {
            patches: (1..=5).collect(),
            time_board: TimeBoard::new(),
            players: [PlayerState::new("A", 0, 5), PlayerState::new("B", 0, 5)],
            current_player: PlayerId::PLAYER_1,
            special_patch_placement: None,
        }
    }

    #[test]
    fn test_visible_patches() {
        let state = sample_state();
        let visible: Vec<_> = state.visible_patches().map(|(slot, p)| (slot, p.id)).collect();
        assert_eq!(visible, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_current_and_other() {
        let mut state = sample_state();
        state.player_mut(PlayerId::PLAYER_2).button_balance = 9;
        assert_eq!(state.current().button_balance, 5);
        assert_eq!(state.other().button_balance, 9);
    }

    #[test]
    fn test_pending_special_patch() {
        let mut state = sample_state();
        assert!(state.pending_special_patch().is_none());
        state.special_patch_placement = Some(38);
        assert_eq!(state.pending_special_patch().map(|p| p.id), Some(35));
    }

    #[test]
    fn test_clone_is_independent() {
        let state = sample_state();
        let mut copy = state.clone();
        copy.patches.pop_front();
        copy.player_mut(PlayerId::PLAYER_1).position = 4;
        assert_eq!(state.patches.len(), 5);
        assert_eq!(state.current().position, 0);
        assert_ne!(state, copy);
    }
}
