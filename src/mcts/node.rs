//! MCTS node and edge structures.
//!
//! Nodes live in the `MCTSTree` arena and reference each other by `NodeId`
//! index. The parent link is a plain index used for upward walks only;
//! the arena owns every node.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::rules::GameState;

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

    /// The ID for arena slot `index`, `None` when it does not fit below
    /// the sentinel.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().filter(|&i| i != u32::MAX).map(Self)
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

/// Edge from a parent to an expanded child.
#[derive(Clone, Debug)]
pub struct Edge<A> {
    /// The action this edge represents.
    pub action: A,

    /// The child reached by playing `action`.
    pub child: NodeId,
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct MCTSNode<S: GameState> {
    /// The wrapped position.
    pub state: S,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Number of backpropagation passes that touched this node.
    pub visits: u32,

    /// Sum of rewards received, from the point of view of the player who
    /// moved into this node.
    pub reward: f64,

    /// Is this a terminal game state?
    pub is_terminal: bool,

    /// Legal actions of `state`, cached at creation.
    pub legal_actions: Vec<S::Action>,

    /// Expanded children in expansion order.
    /// SmallVec optimizes for typical branching factor < 8.
    pub children: SmallVec<[Edge<S::Action>; 8]>,
}

impl<S: GameState> MCTSNode<S> {
    /// Create a new node wrapping `state`.
    pub fn new(state: S, parent: NodeId, depth: u16) -> Self {
        let is_terminal = state.is_terminal();
        let legal_actions = if is_terminal { Vec::new() } else { state.legal_actions() };
        Self {
            state,
            parent,
            depth,
            visits: 0,
            reward: 0.0,
            is_terminal,
            legal_actions,
            children: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(state: S) -> Self {
        Self::new(state, NodeId::NONE, 0)
    }

    /// Check if this is the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Every legal action has a child.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.legal_actions.len()
    }

    /// Check whether `action` already has a child.
    #[must_use]
    pub fn is_expanded(&self, action: &S::Action) -> bool {
        self.children.iter().any(|e| &e.action == action)
    }

    /// First legal action without a child, in enumeration order.
    #[must_use]
    pub fn untried_action(&self) -> Option<&S::Action> {
        self.legal_actions.iter().find(|a| !self.is_expanded(a))
    }

    /// Get the child reached by `action`, if expanded.
    #[must_use]
    pub fn child(&self, action: &S::Action) -> Option<NodeId> {
        self.children.iter().find(|e| &e.action == action).map(|e| e.child)
    }

}
