//! Rules engine trait and game outcome.
//!
//! The engine is the only component that knows the rules; players and
//! search agents drive the game exclusively through this trait.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, GameState, PatchworkError, PlayerId, Result};

/// How a game ended, if it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationKind {
    NotTerminated,
    Player1Won,
    Player2Won,
    Draw,
}

/// Outcome of a state together with both players' scores.
///
/// Scores are always filled in; for a running game they are the score the
/// players would have if it ended now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Termination {
    pub kind: TerminationKind,
    pub player_1_score: i32,
    pub player_2_score: i32,
}

impl Termination {
    /// Classify a finished game by comparing scores.
    #[must_use]
    pub fn finished(player_1_score: i32, player_2_score: i32) -> Self {
        let kind = match player_1_score.cmp(&player_2_score) {
            std::cmp::Ordering::Greater => TerminationKind::Player1Won,
            std::cmp::Ordering::Less => TerminationKind::Player2Won,
            std::cmp::Ordering::Equal => TerminationKind::Draw,
        };
        Self {
            kind,
            player_1_score,
            player_2_score,
        }
    }

    #[must_use]
    pub fn running(player_1_score: i32, player_2_score: i32) -> Self {
        Self {
            kind: TerminationKind::NotTerminated,
            player_1_score,
            player_2_score,
        }
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.kind != TerminationKind::NotTerminated
    }

    /// The winner, `None` for a draw or a running game.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.kind {
            TerminationKind::Player1Won => Some(PlayerId::PLAYER_1),
            TerminationKind::Player2Won => Some(PlayerId::PLAYER_2),
            _ => None,
        }
    }

    /// Final score difference from player 1's point of view.
    ///
    /// # Errors
    ///
    /// [`PatchworkError::IllegalState`] if the game has not ended.
    pub fn score(&self) -> Result<i32> {
        if !self.is_terminated() {
            return Err(PatchworkError::IllegalState(
                "score difference requested for a running game",
            ));
        }
        Ok(self.player_1_score - self.player_2_score)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply` must not mutate its input and must be deterministic
/// - `valid_actions` is authoritative; `sample_random_action` may miss
///   legal moves and is only meant for rollouts
/// - `valid_actions` is empty for a terminated game
pub trait RulesEngine {
    /// The player to move.
    fn current_player(&self, state: &GameState) -> PlayerId {
        state.current_player
    }

    /// Every legal action in `state`.
    fn valid_actions(&self, state: &GameState) -> Vec<Action>;

    /// Successor of `state` after `action`.
    ///
    /// # Errors
    ///
    /// [`PatchworkError::InvalidAction`] if `action` is not legal in `state`.
    fn apply(&self, state: &GameState, action: &Action) -> Result<GameState>;

    /// End-of-game score of `player`.
    fn score(&self, state: &GameState, player: PlayerId) -> i32;

    /// Whether and how the game ended.
    fn termination(&self, state: &GameState) -> Termination;

    /// A cheap, possibly incomplete pick of a legal action for rollouts.
    fn sample_random_action(&self, state: &GameState, rng: &mut GameRng) -> Action;

    // === Convenience Methods ===

    fn is_terminated(&self, state: &GameState) -> bool {
        self.termination(state).is_terminated()
    }
}
