//! Search tree storage.
//!
//! Nodes live in a per-decision arena and refer to each other by index.
//! The root is always index 0. A tree is built for one move decision and
//! thrown away afterwards; releasing it consumes the tree and frees the arena.

use crate::action::Move;
use crate::board::{Color, Position};
use crate::constants::UCT_EXPLORATION;

/// Index of a node inside its [`SearchTree`].
pub type NodeId = usize;

/// Cached selection score of a node.
///
/// An unvisited node has no win ratio yet and always outranks a visited
/// sibling, whatever that sibling's score is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Exploration {
    Unvisited,
    Visited(f64),
}

impl Exploration {
    /// UCT score for `wins` out of `visits`, with `total` search iterations so far.
    pub fn uct(wins: u32, visits: u32, total: u32) -> Self {
        if visits == 0 {
            return Exploration::Unvisited;
        }
        let n = visits as f64;
        let ln_total = (total.max(1) as f64).ln();
        Exploration::Visited(wins as f64 / n + UCT_EXPLORATION * (ln_total / n).sqrt())
    }

    /// Whether `self` should be preferred over `other` during selection.
    ///
    /// Strict: equal scores never outrank, so the first candidate wins ties.
    #[inline]
    pub fn outranks(self, other: Exploration) -> bool {
        match (self, other) {
            (Exploration::Unvisited, Exploration::Unvisited) => false,
            (Exploration::Unvisited, Exploration::Visited(_)) => true,
            (Exploration::Visited(_), Exploration::Unvisited) => false,
            (Exploration::Visited(a), Exploration::Visited(b)) => a > b,
        }
    }
}

/// A node in the search tree.
#[derive(Debug)]
pub struct SearchNode<P> {
    /// Board reached at this node
    pub position: P,
    /// Color whose stone produced this position; the opponent moves next
    pub just_moved: Color,
    /// Placement that led here from the parent (`None` at the root)
    pub last_move: Option<Move>,
    /// Simulations that passed through this node
    pub visits: u32,
    /// Simulations credited as a win (see [`crate::mcts::TreeSearch::backpropagate`])
    pub wins: u32,
    pub exploration: Exploration,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    expanded: bool,
}

impl<P> SearchNode<P> {
    fn new(position: P, just_moved: Color, last_move: Option<Move>, parent: Option<NodeId>) -> Self {
        Self {
            position,
            just_moved,
            last_move,
            visits: 0,
            wins: 0,
            exploration: Exploration::Unvisited,
            children: Vec::new(),
            parent,
            expanded: false,
        }
    }

    /// The color that places the next stone from this position.
    #[inline]
    pub fn to_move(&self) -> Color {
        self.just_moved.opponent()
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Win ratio, or `None` before the first visit.
    pub fn winrate(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.wins as f64 / self.visits as f64)
    }
}

/// Arena holding every node of one decision's search tree.
#[derive(Debug)]
pub struct SearchTree<P> {
    nodes: Vec<SearchNode<P>>,
}

impl<P: Position> SearchTree<P> {
    pub const ROOT: NodeId = 0;

    /// Create a tree with a single, unexpanded root for `to_move` to play from.
    pub fn new(position: P, to_move: Color) -> Self {
        Self {
            nodes: vec![SearchNode::new(position, to_move.opponent(), None, None)],
        }
    }

    /// Materialize one child per legal placement of the side to move.
    ///
    /// Returns the number of children. Calling it again on an expanded node
    /// is a no-op, which also covers terminal nodes with no children.
    pub fn expand(&mut self, id: NodeId) -> usize {
        if self.nodes[id].expanded {
            return self.nodes[id].children.len();
        }

        let mover = self.nodes[id].to_move();
        let mut children = Vec::new();
        for cell in self.nodes[id].position.cells() {
            let mv = Move::new(cell, mover);
            let mut after = self.nodes[id].position.clone();
            if after.try_place(mv) {
                children.push(SearchNode::new(after, mover, Some(mv), Some(id)));
            }
        }

        let first = self.nodes.len();
        let count = children.len();
        self.nodes.extend(children);

        let node = &mut self.nodes[id];
        node.children = (first..first + count).collect();
        node.expanded = true;
        count
    }

    /// Free every node and the arena itself; returns the number of nodes freed.
    pub fn release(self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn root(&self) -> &SearchNode<P> {
        &self.nodes[Self::ROOT]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode<P> {
        &self.nodes[id]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SearchNode<P> {
        &mut self.nodes[id]
    }

    /// Children of a node, in enumeration order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SearchNode<P>> {
        self.nodes[id].children.iter().map(|&c| &self.nodes[c])
    }

    /// Number of edges between the root and `id`.
    pub fn depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.nodes[id].parent {
            id = parent;
            depth += 1;
        }
        depth
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
