//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::{PatchworkError, Result};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCT exploration constant (default: sqrt(2) = 1.414).
    /// Multiplied by the score range seen at the parent, so it stays
    /// meaningful for unnormalised score differences.
    pub exploration_constant: f64,

    /// Iterations per decision (per worker).
    pub iterations: u32,

    /// Maximum nodes to allocate in one tree.
    /// Search stops early once reached.
    pub max_nodes: usize,

    /// Random seed for action shuffling and rollouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Independent trees searched in parallel and merged by root visits.
    pub workers: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            iterations: 1000,
            max_nodes: 100_000,
            seed: 42,
            workers: 1,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a custom iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create a new config with a custom node limit.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Reject budgets the search cannot run with.
    ///
    /// # Errors
    ///
    /// [`PatchworkError::InvalidConfiguration`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(PatchworkError::InvalidConfiguration(
                "iterations must be > 0".into(),
            ));
        }
        if self.max_nodes < 2 {
            return Err(PatchworkError::InvalidConfiguration(format!(
                "max_nodes must be >= 2, got {}",
                self.max_nodes
            )));
        }
        if self.workers == 0 {
            return Err(PatchworkError::InvalidConfiguration(
                "workers must be > 0".into(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(PatchworkError::InvalidConfiguration(format!(
                "exploration_constant must be finite and >= 0, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
