//! Monte Carlo Tree Search player.
//!
//! ## Overview
//!
//! - **Arena tree**: nodes live in a `Vec` and link to their parent by index
//! - **Score-range UCT**: exploration scaled by the spread of scores seen
//!   at the parent, since game outcomes are unnormalised point differences
//! - **Random rollouts**: the engine's cheap sampler plays games out
//! - **Root parallelism**: independent trees merged by root visit counts
//!
//! ## Usage
//!
//! ```rust
//! use patchwork::mcts::{MCTSConfig, MCTSSearch};
//! use patchwork::rules::{Patchwork, RulesEngine};
//!
//! let engine = Patchwork::new();
//! let state = engine.initial_state(Some(0));
//!
//! let config = MCTSConfig::default().with_iterations(100);
//! let mut search = MCTSSearch::new(engine, config).unwrap();
//! let action = search.search(&state).unwrap();
//!
//! assert!(engine.is_legal(&state, &action));
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{MCTSNode, NodeId};
pub use policy::{RandomRollout, ScoreRangeUCT, SelectionPolicy, SimulationPolicy};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
