//! # patchwork
//!
//! A rules engine for the two-player tile-laying game Patchwork, plus
//! tree-search players built on top of it.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `apply` never mutates its input. Every state is
//!    an independent snapshot, so search trees can hold thousands of them.
//!
//! 2. **Bitboards**: a quilt board is a single `u128`; placement legality is
//!    one mask intersection per offset.
//!
//! 3. **Dense action ids**: every action has an id in `0..2026` that is
//!    injective and classifiable without the state.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: the patch queue is an `im::Vector`,
//!   so cloning a state is cheap.
//!
//! - **Explicit randomness**: the engine holds no RNG. Initial shuffles,
//!   rollouts and random players take a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, errors and RNG
//! - `patch`: Patch catalog and shape symmetries
//! - `board`: Quilt board and time board
//! - `rules`: `RulesEngine` trait and the `Patchwork` engine
//! - `mcts`: Monte Carlo Tree Search
//! - `minimax`: Alpha-beta search with static evaluation
//! - `players`: Agents choosing actions for a game loop

pub mod board;
pub mod core;
pub mod mcts;
pub mod minimax;
pub mod patch;
pub mod players;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionId, GameRng, GameState, PatchworkError, PlayerId, PlayerState, Result,
};

pub use crate::board::{CellFlags, QuiltBoard, TimeBoard};

pub use crate::patch::{Patch, PatchCatalog, Shape, Transformation};

pub use crate::rules::{Patchwork, RulesEngine, Termination, TerminationKind};

pub use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};

pub use crate::minimax::{MinimaxConfig, MinimaxSearch, MinimaxStats};

pub use crate::players::{Player, PlayerKind};
