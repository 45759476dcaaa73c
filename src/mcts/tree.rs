//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references; one tree is
//! built per decision and dropped afterwards.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
#[derive(Clone, Debug)]
pub struct MCTSTree {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode>,

    /// The root node ID (always 0).
    root: NodeId,
}

impl MCTSTree {
    /// Create a tree from its root node.
    pub fn new(root: MCTSNode) -> Self {
        Self::with_capacity(root, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root: MCTSNode, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(root);
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a child node and link it to its parent.
    pub fn alloc(&mut self, node: MCTSNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let parent = node.parent;
        self.nodes.push(node);
        if !parent.is_none() {
            self.get_mut(parent).children.push(id);
        }
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `score` (player 1's point of view) to every node from `leaf` up
    /// to the root, each oriented for its own mover.
    pub fn backpropagate(&mut self, leaf: NodeId, score: f64) {
        let mut current = leaf;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.update(node.mover.sign() * score);
            current = node.parent;
        }
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root)
    }

    /// Root children with their visit counts.
    pub fn root_children(&self) -> impl Iterator<Item = &MCTSNode> {
        self.root_node().children.iter().map(|&id| self.get(id))
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal()).count();
        let total_children: usize = self.nodes.iter().map(|n| n.children.len()).sum();
        let fully_expanded = self
            .nodes
            .iter()
            .filter(|n| !n.is_terminal() && n.is_fully_expanded())
            .count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            total_children,
            fully_expanded,
        }
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Total number of parent-child links.
    pub total_children: usize,

    /// Non-terminal nodes with every legal action expanded.
    pub fully_expanded: usize,
}

impl TreeStats {
    /// Average number of children per inner node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        let inner = self.node_count.saturating_sub(self.terminal_count);
        if inner == 0 {
            0.0
        } else {
            self.total_children as f64 / inner as f64
        }
    }
}
