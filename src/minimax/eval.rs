//! Static evaluation of non-terminal positions.

use crate::board::{QuiltBoard, TimeBoard};
use crate::core::{GameState, PlayerId};
use crate::rules::{Termination, TerminationKind};

/// Value of one button of income before any trigger has been passed.
const EARLY_INCOME_WEIGHT: f64 = 8.0;

/// Evaluation from player 1's point of view.
///
/// Decided games are `±∞` (`0` for a draw); otherwise the difference of
/// [`evaluate_player`] for both players.
#[must_use]
pub fn evaluate(state: &GameState, termination: &Termination) -> f64 {
    match termination.kind {
        TerminationKind::Player1Won => f64::INFINITY,
        TerminationKind::Player2Won => f64::NEG_INFINITY,
        TerminationKind::Draw => 0.0,
        TerminationKind::NotTerminated => {
            evaluate_player(state, PlayerId::PLAYER_1) - evaluate_player(state, PlayerId::PLAYER_2)
        }
    }
}

/// Heuristic strength of one player: income value, remaining track and the
/// end-of-game score offset to stay positive.
#[must_use]
pub fn evaluate_player(state: &GameState, player: PlayerId) -> f64 {
    let player_state = state.player(player);
    let position = player_state.position.min(TimeBoard::MAX_POSITION);
    let remaining = f64::from(TimeBoard::MAX_POSITION - position);
    let end_score = f64::from(player_state.score() + 2 * i32::from(QuiltBoard::TILES));
    income_value(state, player) + remaining + end_score
}

/// Income is worth 8 points per button before the first trigger and decays
/// exponentially to 1 point after all of them: `8 * exp(ln(1/8) * passed / 8)`.
#[must_use]
pub fn income_value(state: &GameState, player: PlayerId) -> f64 {
    let player_state = state.player(player);
    let passed = state
        .time_board
        .button_income_triggers_in_range(0..player_state.position as usize + 1);
    let decay = (1.0 / EARLY_INCOME_WEIGHT).ln() * passed as f64 / 8.0;
    let weight = EARLY_INCOME_WEIGHT * decay.exp();
    weight * f64::from(player_state.quilt_board.button_income())
}
