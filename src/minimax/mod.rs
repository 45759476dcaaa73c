//! Alpha-beta minimax player.
//!
//! Fixed-depth search over [`RulesEngine`](crate::rules::RulesEngine) calls
//! with a static evaluation at the horizon. Placement branches are cut to the
//! best few per purchase slot by local fit; walking is always searched.
//!
//! ```rust
//! use patchwork::minimax::{MinimaxConfig, MinimaxSearch};
//! use patchwork::rules::{Patchwork, RulesEngine};
//!
//! let engine = Patchwork::new();
//! let state = engine.initial_state(Some(0));
//!
//! let mut search = MinimaxSearch::new(engine, MinimaxConfig::default().with_depth(2)).unwrap();
//! let action = search.search(&state).unwrap();
//!
//! assert!(engine.is_legal(&state, &action));
//! ```

pub mod config;
pub mod eval;
pub mod ordering;
pub mod search;

pub use config::MinimaxConfig;
pub use eval::{evaluate, evaluate_player};
pub use ordering::{placement_fit, top_actions};
pub use search::{MinimaxSearch, MinimaxStats};
