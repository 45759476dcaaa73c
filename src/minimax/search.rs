//! Fixed-depth alpha-beta search.
//!
//! Player 1 maximises and player 2 minimises [`evaluate`]. A mover who keeps
//! the turn stays on the same side of the recursion, so plies are counted
//! per action rather than per player.

use std::time::Instant;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::{Action, GameState, PatchworkError, Result};
use crate::rules::RulesEngine;

use super::config::MinimaxConfig;
use super::eval::evaluate;
use super::ordering::top_actions;

/// Counters of one alpha-beta decision.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimaxStats {
    /// States visited, the root's children included.
    pub nodes: u64,

    /// Sibling loops cut short by the alpha-beta window.
    pub cutoffs: u64,

    /// Static evaluations performed.
    pub evaluations: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

/// Alpha-beta search context.
pub struct MinimaxSearch<E: RulesEngine> {
    engine: E,
    config: MinimaxConfig,
    stats: MinimaxStats,
}

impl<E: RulesEngine> MinimaxSearch<E> {
    /// # Errors
    ///
    /// [`PatchworkError::InvalidConfiguration`] if `config` does not validate.
    pub fn new(engine: E, config: MinimaxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            stats: MinimaxStats::default(),
        })
    }

    /// Pick the action with the best backed-up value for the mover.
    ///
    /// Ties keep the first action in pruned generation order, so the result
    /// is deterministic.
    ///
    /// # Errors
    ///
    /// - [`PatchworkError::IllegalState`] if the game is already over
    /// - [`PatchworkError::NoValidActions`] if nothing is legal
    pub fn search(&mut self, state: &GameState) -> Result<Action> {
        let start = Instant::now();
        self.stats = MinimaxStats::default();

        if self.engine.is_terminated(state) {
            return Err(PatchworkError::IllegalState(
                "search started from a terminated state",
            ));
        }

        let actions = self.engine.valid_actions(state);
        match actions.as_slice() {
            [] => return Err(PatchworkError::NoValidActions),
            [only] => {
                debug!("minimax: single legal action {only}, skipping search");
                return Ok(*only);
            }
            _ => {}
        }

        let maximizing = state.current_player.is_player_1();
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best: Option<(Action, f64)> = None;

        for action in top_actions(state, actions, self.config.actions_per_patch) {
            let next = self.engine.apply(state, &action)?;
            let value = self.alpha_beta(&next, self.config.depth - 1, alpha, beta)?;
            trace!("minimax: {action} -> {value}");

            let improves = match best {
                None => true,
                Some((_, best_value)) if maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some((action, value));
                if maximizing {
                    alpha = alpha.max(value);
                } else {
                    beta = beta.min(value);
                }
            }
        }

        let (action, value) = best.ok_or(PatchworkError::NoValidActions)?;
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "minimax: chose {action} (value {value:.2}) after {} nodes, {} cutoffs, {} us",
            self.stats.nodes, self.stats.cutoffs, self.stats.time_us
        );
        Ok(action)
    }

    /// Value of `state` searched `depth` plies deep within `(alpha, beta)`.
    ///
    /// # Errors
    ///
    /// Any engine error raised while applying actions.
    pub fn alpha_beta(
        &mut self,
        state: &GameState,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64> {
        self.stats.nodes += 1;

        let termination = self.engine.termination(state);
        if depth == 0 || termination.is_terminated() {
            self.stats.evaluations += 1;
            return Ok(evaluate(state, &termination));
        }

        let actions = top_actions(
            state,
            self.engine.valid_actions(state),
            self.config.actions_per_patch,
        );

        if state.current_player.is_player_1() {
            let mut value = f64::NEG_INFINITY;
            for action in actions {
                let next = self.engine.apply(state, &action)?;
                value = value.max(self.alpha_beta(&next, depth - 1, alpha, beta)?);
                alpha = alpha.max(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            Ok(value)
        } else {
            let mut value = f64::INFINITY;
            for action in actions {
                let next = self.engine.apply(state, &action)?;
                value = value.min(self.alpha_beta(&next, depth - 1, alpha, beta)?);
                beta = beta.min(value);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            Ok(value)
        }
    }

    #[must_use]
    pub fn stats(&self) -> &MinimaxStats {
        &self.stats
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }
}
