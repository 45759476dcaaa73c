//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into
//! - `SimulationPolicy`: How to play a state out to the end

use crate::core::{GameRng, GameState, Result};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::node::NodeId;
use super::tree::MCTSTree;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select the child of `node` to descend into.
    ///
    /// Returns `None` if the node has no children.
    fn select(&self, tree: &MCTSTree, node: NodeId, config: &MCTSConfig) -> Option<NodeId>;
}

/// UCT with the exploration term scaled by the parent's score range.
///
/// Formula: Q(c) + C * (max - min) * sqrt(ln(N) / n(c))
///
/// Q is an unnormalised end-of-game score difference; the range puts the
/// exploration term on the same scale.
#[derive(Clone, Debug, Default)]
pub struct ScoreRangeUCT;

impl SelectionPolicy for ScoreRangeUCT {
    fn select(&self, tree: &MCTSTree, node: NodeId, config: &MCTSConfig) -> Option<NodeId> {
        let parent = tree.get(node);
        let ln_parent = f64::from(parent.visits.max(1)).ln();
        let scale = config.exploration_constant * parent.score_range();

        parent
            .children
            .iter()
            .map(|&id| {
                let child = tree.get(id);
                let value = if child.visits == 0 {
                    f64::INFINITY
                } else {
                    child.mean_score() + scale * (ln_parent / f64::from(child.visits)).sqrt()
                };
                (id, value)
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(id, _)| id)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running rollouts.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Play `state` out and return the final score difference from player
    /// 1's point of view.
    fn simulate(&self, engine: &E, state: &GameState, rng: &mut GameRng) -> Result<i32>;
}

/// Plays the engine's cheap random sampler until the game ends.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl<E: RulesEngine> SimulationPolicy<E> for RandomRollout {
    fn simulate(&self, engine: &E, state: &GameState, rng: &mut GameRng) -> Result<i32> {
        let mut state = state.clone();
        loop {
            let termination = engine.termination(&state);
            if termination.is_terminated() {
                return termination.score();
            }
            let action = engine.sample_random_action(&state, rng);
            state = engine.apply(&state, &action)?;
        }
    }
}
