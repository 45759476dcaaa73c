//! Game rules.
//!
//! `RulesEngine` is the contract the players and search agents program
//! against; `Patchwork` is the implementation of the actual game:
//! - Legal actions for each game state
//! - How actions produce the next state
//! - When the game ends and who won

pub mod engine;
mod patchwork;

pub use engine::{RulesEngine, Termination, TerminationKind};
pub use patchwork::Patchwork;
