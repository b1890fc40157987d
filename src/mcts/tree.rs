//! The search tree: one `Vec` of nodes addressed by `NodeId`.
//!
//! Nodes are only ever appended. The whole arena goes away with the search
//! that built it.

use log::trace;

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use crate::core::SearchError;
use crate::rules::GameState;

/// Node arena rooted at the searched position.
#[derive(Clone, Debug)]
pub struct MCTSTree<S: GameState> {
    nodes: Vec<MCTSNode<S>>,

    /// Always index 0.
    root: NodeId,
}

impl<S: GameState> MCTSTree<S> {
    /// A one-node tree wrapping `state`.
    pub fn new(state: S) -> Self {
        Self::with_capacity(state, MCTSConfig::default().node_capacity)
    }

    /// Like `new`, reserving room for `capacity` nodes.
    pub fn with_capacity(state: S, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root(state));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Panics on an ID from another tree.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<S> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<S> {
        self.get(self.root)
    }

    /// Expand `action` under `parent`, returning the new child.
    ///
    /// The action must be legal at the parent and not yet expanded.
    pub fn add_child(&mut self, parent: NodeId, action: S::Action) -> Result<NodeId, SearchError> {
        let node = self.get(parent);
        if !node.legal_actions.contains(&action) {
            return Err(SearchError::IllegalAction {
                node: parent,
                action: format!("{:?}", action),
            });
        }
        if node.is_expanded(&action) {
            return Err(SearchError::DuplicateAction {
                node: parent,
                action: format!("{:?}", action),
            });
        }

        let state = node.state.apply(&action);
        let depth = node.depth + 1;
        let id = NodeId::from_index(self.nodes.len()).ok_or(SearchError::TreeFull(self.nodes.len()))?;
        trace!("expanding {:?} under {} as {}", action, parent, id);

        self.nodes.push(MCTSNode::new(state, parent, depth));
        self.get_mut(parent).children.push(Edge { action, child: id });
        Ok(id)
    }

    /// Every legal action of the node has a child.
    #[must_use]
    pub fn is_fully_expanded(&self, id: NodeId) -> bool {
        self.get(id).is_fully_expanded()
    }

    /// First legal action of the node without a child.
    #[must_use]
    pub fn untried_action(&self, id: NodeId) -> Option<S::Action> {
        self.get(id).untried_action().cloned()
    }

    /// Child IDs of a node, in expansion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get(id).children.iter().map(|e| e.child)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Shape summary for diagnostics.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let total_actions: usize = self.nodes.iter().map(|n| n.legal_actions.len()).sum();
        let expanded_actions: usize = self.nodes.iter().map(|n| n.children.len()).sum();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            total_actions,
            expanded_actions,
        }
    }
}

/// Shape of a tree at one point in time.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    pub node_count: usize,

    /// Deepest node, root = 0.
    pub max_depth: u16,

    pub terminal_count: usize,

    /// Legal actions summed over all nodes.
    pub total_actions: usize,

    /// Actions that have a child node.
    pub expanded_actions: usize,
}

impl TreeStats {
    /// Mean legal actions per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_actions as f64 / self.node_count as f64
        }
    }

    /// Share of legal actions that have been expanded.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.total_actions == 0 {
            0.0
        } else {
            self.expanded_actions as f64 / self.total_actions as f64
        }
    }
}
