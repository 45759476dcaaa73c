//! MCTS node structure.
//!
//! Uses arena-based allocation with index references (NodeId): the parent
//! link is an index, so walking back up for backpropagation needs no
//! pointers or reference counting.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameState, PlayerId};
use crate::rules::Termination;

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the MCTS tree.
///
/// Statistics are stored from the point of view of `mover`, the player who
/// chose the action leading here, which is the player who selects among
/// this node and its siblings.
#[derive(Clone, Debug)]
pub struct MCTSNode {
    /// Snapshot after `action` was applied.
    pub state: GameState,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Action that led here from the parent (None for root).
    pub action: Option<Action>,

    /// Player whose point of view `score_sum` takes.
    pub mover: PlayerId,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Cached outcome of `state`.
    pub termination: Termination,

    /// Legal actions without a child yet, shuffled once at creation.
    pub expandable_actions: Vec<Action>,

    pub children: Vec<NodeId>,

    pub visits: u32,

    /// Sum of backpropagated values.
    pub score_sum: f64,

    /// Largest value seen in this subtree.
    pub max_score: f64,

    /// Smallest value seen in this subtree.
    pub min_score: f64,
}

impl MCTSNode {
    /// Create a new node.
    pub fn new(
        state: GameState,
        parent: NodeId,
        action: Option<Action>,
        mover: PlayerId,
        depth: u16,
        termination: Termination,
        expandable_actions: Vec<Action>,
    ) -> Self {
        Self {
            state,
            parent,
            action,
            mover,
            depth,
            termination,
            expandable_actions,
            children: Vec::new(),
            visits: 0,
            score_sum: 0.0,
            max_score: f64::NEG_INFINITY,
            min_score: f64::INFINITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.termination.is_terminated()
    }

    /// Every legal action has a child (trivially true for terminal nodes).
    #[inline]
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.expandable_actions.is_empty()
    }

    /// Mean backpropagated value.
    #[must_use]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score_sum / f64::from(self.visits)
        }
    }

    /// Spread between the best and worst values seen, 0 before the first.
    #[must_use]
    pub fn score_range(&self) -> f64 {
        if self.max_score >= self.min_score {
            self.max_score - self.min_score
        } else {
            0.0
        }
    }

    /// Record one backpropagated value.
    pub fn update(&mut self, value: f64) {
        self.visits += 1;
        self.score_sum += value;
        self.max_score = self.max_score.max(value);
        self.min_score = self.min_score.min(value);
    }
}
