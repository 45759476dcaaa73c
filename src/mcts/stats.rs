//! Counters of one MCTS decision.

use serde::{Deserialize, Serialize};

/// Statistics collected during one call to
/// [`MCTSSearch::search`](super::MCTSSearch::search).
///
/// With several workers the counters are summed over all trees, except
/// `max_depth` (the deepest tree) and `time_us` (wall clock).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u32,

    /// Nodes added below the roots.
    pub nodes_expanded: u32,

    /// Rollouts played; iterations ending on a terminal node need none.
    pub simulations: u32,

    pub max_depth: u16,

    /// Trees grown.
    pub workers: u32,

    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold in the counters of another worker's tree.
    pub fn merge(&mut self, other: &SearchStats) {
        self.iterations += other.iterations;
        self.nodes_expanded += other.nodes_expanded;
        self.simulations += other.simulations;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.workers += other.workers;
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        self.per_second(self.iterations)
    }

    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        self.per_second(self.simulations)
    }

    fn per_second(&self, count: u32) -> f64 {
        match self.time_us {
            0 => 0.0,
            us => f64::from(count) * 1e6 / us as f64,
        }
    }
}
