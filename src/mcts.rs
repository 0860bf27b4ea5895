//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! Each search cycle:
//! - descends from the root along the highest UCT score to a leaf
//! - expands the leaf (all children at once)
//! - plays a random playout from the leaf
//! - propagates the result back to the root
//!
//! Every decision builds a fresh tree; nothing is reused between moves.

use std::time::Duration;

use log::{debug, trace};

use crate::action::Move;
use crate::board::{Color, Position};
use crate::budget::{Budget, BudgetController};
use crate::node::{Exploration, NodeId, SearchTree};
use crate::rollout::RolloutPolicy;

/// Summary of a completed search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    pub iterations: u32,
    pub nodes: usize,
    pub elapsed: Duration,
}

/// A single-tree MCTS engine for one move decision.
pub struct TreeSearch<P> {
    tree: SearchTree<P>,
    policy: RolloutPolicy,
    iterations: u32,
}

impl<P: Position> TreeSearch<P> {
    /// Create an engine searching for `to_move` from `position`.
    ///
    /// The root is expanded immediately.
    pub fn new(position: P, to_move: Color, rng: fastrand::Rng) -> Self {
        let policy = RolloutPolicy::new(position.cell_count(), rng);
        let mut tree = SearchTree::new(position, to_move);
        tree.expand(SearchTree::<P>::ROOT);
        Self {
            tree,
            policy,
            iterations: 0,
        }
    }

    pub fn tree(&self) -> &SearchTree<P> {
        &self.tree
    }

    /// Completed search cycles.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Descend from the root to a node without children.
    ///
    /// At each level the child with the highest exploration value is taken;
    /// unvisited children come first and ties go to the earliest child.
    pub fn select(&self) -> NodeId {
        let mut id = SearchTree::<P>::ROOT;
        loop {
            let children = &self.tree.node(id).children;
            let Some(&first) = children.first() else {
                return id;
            };
            let mut best = first;
            for &child in &children[1..] {
                if self
                    .tree
                    .node(child)
                    .exploration
                    .outranks(self.tree.node(best).exploration)
                {
                    best = child;
                }
            }
            id = best;
        }
    }

    /// Expand a selected leaf. Terminal leaves stay childless.
    pub fn expand(&mut self, leaf: NodeId) -> usize {
        self.tree.expand(leaf)
    }

    /// Play a random game from `leaf`; returns the winner.
    pub fn simulate(&mut self, leaf: NodeId) -> Color {
        let node = self.tree.node(leaf);
        self.policy.simulate(&node.position, node.to_move()).winner
    }

    /// Credit a playout result to every node from `leaf` up to the root.
    ///
    /// Counts one iteration. Wins are counted from the point of view of the
    /// side to move at the root: a node scores a win when that side won the
    /// playout, on every level of the path.
    pub fn backpropagate(&mut self, leaf: NodeId, winner: Color) {
        self.iterations += 1;
        let total = self.iterations;
        let win = winner == self.tree.root().to_move();

        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            let node = self.tree.node_mut(id);
            node.visits += 1;
            if win {
                node.wins += 1;
            }
            node.exploration = Exploration::uct(node.wins, node.visits, total);
            cursor = node.parent;
        }
    }

    /// Run one select/expand/simulate/backpropagate cycle.
    ///
    /// Returns the depth of the leaf that was simulated.
    pub fn step(&mut self) -> usize {
        let leaf = self.select();
        self.expand(leaf);
        let winner = self.simulate(leaf);
        self.backpropagate(leaf, winner);
        self.tree.depth(leaf)
    }

    /// Run cycles until the budget is spent.
    pub fn run(&mut self, budget: Budget) -> SearchStats {
        let controller = BudgetController::start(budget, self.tree.root().position.stones());
        let mut done = 0;
        while !controller.exhausted(done) {
            self.step();
            done += 1;
        }

        let stats = SearchStats {
            iterations: self.iterations,
            nodes: self.tree.len(),
            elapsed: controller.elapsed(),
        };
        debug!(
            "search: {} iterations, {} nodes in {:.3}s",
            stats.iterations,
            stats.nodes,
            stats.elapsed.as_secs_f64()
        );
        stats
    }

    /// The most visited root child's move, or `None` if the root has no children.
    pub fn best_action(&self) -> Option<Move> {
        best_action(&self.tree)
    }

    /// Free the tree; returns the number of nodes freed.
    pub fn release(self) -> usize {
        self.tree.release()
    }
}

/// Find the best move (most visited root child, earliest on ties).
pub fn best_action<P: Position>(tree: &SearchTree<P>) -> Option<Move> {
    let mut best: Option<(u32, Move)> = None;
    for child in tree.children(SearchTree::<P>::ROOT) {
        let Some(mv) = child.last_move else {
            continue;
        };
        if best.is_none_or(|(visits, _)| child.visits > visits) {
            best = Some((child.visits, mv));
        }
    }
    best.map(|(_, mv)| mv)
}

/// Search `position` for `to_move` and return the chosen move.
///
/// The tree is released before returning, on every path.
pub fn tree_search<P: Position>(
    position: &P,
    to_move: Color,
    budget: Budget,
    rng: fastrand::Rng,
) -> Option<Move> {
    let mut search = TreeSearch::new(position.clone(), to_move, rng);
    if search.tree().root().children.is_empty() {
        return None;
    }
    search.run(budget);
    dump_children(search.tree());
    let best = search.best_action();
    search.release();
    best
}

/// Log statistics for the root's children.
pub fn dump_children<P: Position>(tree: &SearchTree<P>) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    let size = tree.root().position.size();
    for child in tree.children(SearchTree::<P>::ROOT) {
        if let Some(mv) = child.last_move {
            trace!(
                "move {} v={} w={} wr={:.3}",
                mv.display(size),
                child.visits,
                child.wins,
                child.winrate().unwrap_or(0.0)
            );
        }
    }
}
