//! Uniformly random player.

use crate::core::{Action, GameRng, GameState, PatchworkError, Result};
use crate::rules::{Patchwork, RulesEngine};

use super::Player;

/// Picks uniformly among [`RulesEngine::valid_actions`].
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_action(&mut self, engine: &Patchwork, state: &GameState) -> Result<Action> {
        self.rng
            .choose(&engine.valid_actions(state))
            .copied()
            .ok_or(PatchworkError::NoValidActions)
    }
}
