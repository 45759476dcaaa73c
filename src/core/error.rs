//! Error taxonomy for the engine and the search agents.

use thiserror::Error;

use super::action::ActionId;

/// Errors surfaced by the engine and the players.
///
/// All of these signal a bug in the caller (or in the engine itself), never
/// an expected game condition, so callers should report them with the state
/// that produced them rather than retry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatchworkError {
    /// `apply` was called with an action that is not legal in the given state.
    #[error("invalid action {action}: {reason}")]
    InvalidAction {
        action: ActionId,
        reason: &'static str,
    },

    /// An action naming a purchase slot or board position that does not exist.
    #[error("malformed action: {0}")]
    MalformedAction(&'static str),

    /// An operation that only makes sense for a terminated (or running) game
    /// was used on the wrong kind of state.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// A player or search was configured with an unusable budget.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A search was started on a state without any legal action.
    #[error("no valid actions available")]
    NoValidActions,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PatchworkError>;
