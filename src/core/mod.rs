//! Core types: players, state, actions, errors and RNG.
//!
//! Everything the rules engine and the search agents exchange lives here.

pub mod action;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionId};
pub use error::{PatchworkError, Result};
pub use player::{PlayerId, PlayerState};
pub use rng::GameRng;
pub use state::GameState;
