//! Core MCTS search algorithm.
//!
//! Each decision builds a fresh tree rooted at the current state and runs
//! select / expand / simulate / backpropagate for the configured budget.
//! With `workers > 1` independent trees are grown in parallel from forked
//! seeds and merged by summing root visit counts per action.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::core::{Action, ActionId, GameRng, GameState, PatchworkError, Result};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::node::{MCTSNode, NodeId};
use super::policy::{RandomRollout, ScoreRangeUCT, SelectionPolicy, SimulationPolicy};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Generic over the rules engine type. Owns the configuration, the
/// policies and the most recent tree.
pub struct MCTSSearch<E: RulesEngine> {
    /// The game rules engine.
    engine: E,

    /// Search configuration.
    config: MCTSConfig,

    /// RNG seeding each decision's trees.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<E>>,

    /// Tree of the last search (first worker's when parallel).
    tree: Option<MCTSTree>,

    /// Search statistics.
    stats: SearchStats,
}

impl<E: RulesEngine + Sync> MCTSSearch<E> {
    /// Create a new MCTS search context.
    ///
    /// # Errors
    ///
    /// [`PatchworkError::InvalidConfiguration`] if `config` does not validate.
    pub fn new(engine: E, config: MCTSConfig) -> Result<Self> {
        config.validate()?;
        let rng = GameRng::new(config.seed);

        Ok(Self {
            engine,
            config,
            rng,
            selection: Box::new(ScoreRangeUCT),
            simulation: Box::new(RandomRollout),
            tree: None,
            stats: SearchStats::default(),
        })
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<E> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Pick an action for the player to move in `state`.
    ///
    /// Returns the root child with the most visits. A state with a single
    /// legal action returns it without searching.
    ///
    /// # Errors
    ///
    /// - [`PatchworkError::IllegalState`] if the game is already over
    /// - [`PatchworkError::NoValidActions`] if nothing is legal
    /// - any engine error raised while expanding or simulating
    pub fn search(&mut self, state: &GameState) -> Result<Action> {
        let start = Instant::now();
        self.stats.reset();
        self.tree = None;

        if self.engine.is_terminated(state) {
            return Err(PatchworkError::IllegalState(
                "search started from a terminated state",
            ));
        }

        let actions = self.engine.valid_actions(state);
        match actions.as_slice() {
            [] => return Err(PatchworkError::NoValidActions),
            [only] => {
                debug!("mcts: single legal action {only}, skipping search");
                return Ok(*only);
            }
            _ => {}
        }

        let action = if self.config.workers == 1 {
            let rng = self.rng.fork();
            let (tree, stats) = self.grow_tree(state, actions, rng)?;
            self.stats.merge(&stats);
            let best = most_visited(&tree)?;
            self.tree = Some(tree);
            best
        } else {
            let worker_rngs: Vec<GameRng> =
                (0..self.config.workers).map(|_| self.rng.fork()).collect();
            let results: Vec<(MCTSTree, SearchStats)> = worker_rngs
                .into_par_iter()
                .map(|rng| self.grow_tree(state, actions.clone(), rng))
                .collect::<Result<_>>()?;

            let mut visits: FxHashMap<ActionId, (Action, u32)> = FxHashMap::default();
            for (tree, stats) in &results {
                self.stats.merge(stats);
                for child in tree.root_children() {
                    if let Some(action) = child.action {
                        visits.entry(action.id()).or_insert((action, 0)).1 += child.visits;
                    }
                }
            }
            self.tree = results.into_iter().next().map(|(tree, _)| tree);

            visits
                .into_iter()
                .max_by_key(|(id, (_, count))| (*count, std::cmp::Reverse(*id)))
                .map(|(_, (action, _))| action)
                .ok_or(PatchworkError::NoValidActions)?
        };

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            "mcts: chose {action} after {} iterations ({} workers, {} nodes, {} us)",
            self.stats.iterations, self.stats.workers, self.stats.nodes_expanded, self.stats.time_us
        );
        Ok(action)
    }

    /// Grow one tree for the configured budget.
    fn grow_tree(
        &self,
        state: &GameState,
        mut actions: Vec<Action>,
        mut rng: GameRng,
    ) -> Result<(MCTSTree, SearchStats)> {
        let mut stats = SearchStats {
            workers: 1,
            ..SearchStats::default()
        };

        rng.shuffle(&mut actions);
        let root = MCTSNode::new(
            state.clone(),
            NodeId::NONE,
            None,
            state.current_player,
            0,
            self.engine.termination(state),
            actions,
        );
        let capacity = self.config.max_nodes.min(self.config.iterations as usize + 1);
        let mut tree = MCTSTree::with_capacity(root, capacity);

        for _ in 0..self.config.iterations {
            self.iteration(&mut tree, &mut rng, &mut stats)?;
            stats.iterations += 1;

            // Check node limit
            if tree.len() >= self.config.max_nodes {
                break;
            }
        }

        Ok((tree, stats))
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(
        &self,
        tree: &mut MCTSTree,
        rng: &mut GameRng,
        stats: &mut SearchStats,
    ) -> Result<()> {
        // === SELECTION ===
        let mut current = tree.root();
        loop {
            let node = tree.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                break;
            }
            match self.selection.select(tree, current, &self.config) {
                Some(child) => current = child,
                None => break,
            }
        }

        // === EXPANSION ===
        let leaf = if tree.get(current).is_terminal() || tree.get(current).is_fully_expanded() {
            current
        } else {
            self.expand(tree, current, rng, stats)?
        };

        // === SIMULATION ===
        let node = tree.get(leaf);
        let score = if node.is_terminal() {
            node.termination.score()?
        } else {
            stats.simulations += 1;
            self.simulation.simulate(&self.engine, &node.state, rng)?
        };

        // === BACKPROPAGATION ===
        tree.backpropagate(leaf, f64::from(score));
        Ok(())
    }

    /// Pop one unexpanded action of `parent` and add its child.
    fn expand(
        &self,
        tree: &mut MCTSTree,
        parent: NodeId,
        rng: &mut GameRng,
        stats: &mut SearchStats,
    ) -> Result<NodeId> {
        let parent_node = tree.get_mut(parent);
        let Some(action) = parent_node.expandable_actions.pop() else {
            return Ok(parent);
        };
        let mover = parent_node.state.current_player;
        let depth = parent_node.depth + 1;
        let state = self.engine.apply(&parent_node.state, &action)?;

        let termination = self.engine.termination(&state);
        let mut expandable_actions = if termination.is_terminated() {
            Vec::new()
        } else {
            self.engine.valid_actions(&state)
        };
        rng.shuffle(&mut expandable_actions);

        stats.nodes_expanded += 1;
        stats.max_depth = stats.max_depth.max(depth);

        Ok(tree.alloc(MCTSNode::new(
            state,
            parent,
            Some(action),
            mover,
            depth,
            termination,
            expandable_actions,
        )))
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the tree of the last search, if one was built.
    #[must_use]
    pub fn tree(&self) -> Option<&MCTSTree> {
        self.tree.as_ref()
    }

    /// Get action visit counts from the last root.
    ///
    /// Returns (action, visit_count) pairs.
    pub fn action_visits(&self) -> Vec<(Action, u32)> {
        self.tree
            .iter()
            .flat_map(|tree| tree.root_children())
            .filter_map(|child| child.action.map(|action| (action, child.visits)))
            .collect()
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

/// The root child with the most visits.
fn most_visited(tree: &MCTSTree) -> Result<Action> {
    tree.root_children()
        .max_by_key(|child| child.visits)
        .and_then(|child| child.action)
        .ok_or(PatchworkError::NoValidActions)
}
