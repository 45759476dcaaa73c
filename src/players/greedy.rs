//! One-ply player on the alpha-beta static evaluation.

use crate::core::{Action, GameState, PatchworkError, Result};
use crate::minimax::evaluate;
use crate::rules::{Patchwork, RulesEngine};

use super::Player;

/// Applies every legal action and keeps the one whose successor evaluates
/// best for the mover. Ties keep the first action generated.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPlayer;

impl Player for GreedyPlayer {
    fn choose_action(&mut self, engine: &Patchwork, state: &GameState) -> Result<Action> {
        let sign = state.current_player.sign();
        let mut best: Option<(Action, f64)> = None;

        for action in engine.valid_actions(state) {
            let next = engine.apply(state, &action)?;
            let value = sign * evaluate(&next, &engine.termination(&next));
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((action, value));
            }
        }

        best.map(|(action, _)| action)
            .ok_or(PatchworkError::NoValidActions)
    }
}
