//! Game-playing agents.
//!
//! Every agent implements [`Player`]. [`PlayerKind`] is the closed set a
//! caller can pick from at runtime and dispatches by `match`.

mod greedy;
mod random;
mod search;

pub use greedy::GreedyPlayer;
pub use random::RandomPlayer;
pub use search::{MctsPlayer, MinimaxPlayer};

use crate::core::{Action, GameState, Result};
use crate::mcts::MCTSConfig;
use crate::minimax::MinimaxConfig;
use crate::rules::Patchwork;

/// An agent that picks the next action for the player to move.
pub trait Player {
    /// # Errors
    ///
    /// [`PatchworkError::NoValidActions`](crate::core::PatchworkError::NoValidActions)
    /// when nothing is legal, or any error of the underlying search.
    fn choose_action(&mut self, engine: &Patchwork, state: &GameState) -> Result<Action>;
}

/// Closed set of agents.
pub enum PlayerKind {
    Random(RandomPlayer),
    Greedy(GreedyPlayer),
    Mcts(MctsPlayer),
    Minimax(MinimaxPlayer),
}

impl PlayerKind {
    #[must_use]
    pub fn random(seed: u64) -> Self {
        PlayerKind::Random(RandomPlayer::new(seed))
    }

    #[must_use]
    pub fn greedy() -> Self {
        PlayerKind::Greedy(GreedyPlayer)
    }

    /// # Errors
    ///
    /// Invalid configuration.
    pub fn mcts(config: MCTSConfig) -> Result<Self> {
        MctsPlayer::new(config).map(PlayerKind::Mcts)
    }

    /// # Errors
    ///
    /// Invalid configuration.
    pub fn minimax(config: MinimaxConfig) -> Result<Self> {
        MinimaxPlayer::new(config).map(PlayerKind::Minimax)
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PlayerKind::Random(_) => "random",
            PlayerKind::Greedy(_) => "greedy",
            PlayerKind::Mcts(_) => "mcts",
            PlayerKind::Minimax(_) => "minimax",
        }
    }
}

impl Player for PlayerKind {
    fn choose_action(&mut self, engine: &Patchwork, state: &GameState) -> Result<Action> {
        match self {
            PlayerKind::Random(player) => player.choose_action(engine, state),
            PlayerKind::Greedy(player) => player.choose_action(engine, state),
            PlayerKind::Mcts(player) => player.choose_action(engine, state),
            PlayerKind::Minimax(player) => player.choose_action(engine, state),
        }
    }
}
