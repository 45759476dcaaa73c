//! Players backed by the tree searches.

use crate::core::{Action, GameState, Result};
use crate::mcts::{MCTSConfig, MCTSSearch};
use crate::minimax::{MinimaxConfig, MinimaxSearch};
use crate::rules::Patchwork;

use super::Player;

/// Monte Carlo Tree Search player.
pub struct MctsPlayer {
    search: MCTSSearch<Patchwork>,
}

impl MctsPlayer {
    /// # Errors
    ///
    /// [`PatchworkError::InvalidConfiguration`](crate::core::PatchworkError::InvalidConfiguration)
    /// if `config` does not validate.
    pub fn new(config: MCTSConfig) -> Result<Self> {
        Ok(Self {
            search: MCTSSearch::new(Patchwork::new(), config)?,
        })
    }

    pub fn search(&self) -> &MCTSSearch<Patchwork> {
        &self.search
    }
}

impl Player for MctsPlayer {
    fn choose_action(&mut self, _engine: &Patchwork, state: &GameState) -> Result<Action> {
        self.search.search(state)
    }
}

/// Alpha-beta minimax player.
pub struct MinimaxPlayer {
    search: MinimaxSearch<Patchwork>,
}

impl MinimaxPlayer {
    /// # Errors
    ///
    /// [`PatchworkError::InvalidConfiguration`](crate::core::PatchworkError::InvalidConfiguration)
    /// if `config` does not validate.
    pub fn new(config: MinimaxConfig) -> Result<Self> {
        Ok(Self {
            search: MinimaxSearch::new(Patchwork::new(), config)?,
        })
    }

    pub fn search(&self) -> &MinimaxSearch<Patchwork> {
        &self.search
    }
}

impl Player for MinimaxPlayer {
    fn choose_action(&mut self, _engine: &Patchwork, state: &GameState) -> Result<Action> {
        self.search.search(state)
    }
}
