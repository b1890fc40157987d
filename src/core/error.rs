//! Search error taxonomy.
//!
//! Every variant except `Context` signals a broken structural invariant of
//! the search tree. None of them are recovered from mid-search: the agent
//! aborts the top-level call as soon as one surfaces.

use thiserror::Error;

use crate::mcts::NodeId;

/// Errors raised by the tree, the search, and the players.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Expansion was asked for an action the node's position does not allow.
    #[error("action {action} is not legal at {node}")]
    IllegalAction { node: NodeId, action: String },

    /// Expansion was asked for an action that already has a child.
    #[error("action {action} is already expanded at {node}")]
    DuplicateAction { node: NodeId, action: String },

    /// Expansion was invoked on a node with no untried actions.
    #[error("{0} is already fully expanded")]
    FullyExpanded(NodeId),

    /// Scoring was invoked on a node with no children.
    #[error("{0} has no children to score")]
    EmptyChildren(NodeId),

    /// Scoring met a child that has never received a backpropagation.
    #[error("child {child} of {parent} has zero visits")]
    UnvisitedChild { parent: NodeId, child: NodeId },

    /// A rollout reached a position that is not terminal yet offers no move.
    #[error("non-terminal position at ply {ply} has no legal actions")]
    DeadEnd { ply: u32 },

    /// The node arena has no index left below `NodeId::NONE`.
    #[error("tree is full at {0} nodes")]
    TreeFull(usize),

    /// The position offers no legal action to publish.
    #[error("no legal actions available")]
    NoLegalActions,

    /// A player context could not be encoded or decoded.
    #[error("context encoding failed: {0}")]
    Context(#[from] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SearchError::UnvisitedChild {
            parent: NodeId::new(0),
            child: NodeId::new(3),
        };
        assert_eq!(err.to_string(), "child NodeId(3) of NodeId(0) has zero visits");

        let err = SearchError::DeadEnd { ply: 12 };
        assert_eq!(err.to_string(), "non-terminal position at ply 12 has no legal actions");

        let err = SearchError::EmptyChildren(NodeId::new(0));
        assert_eq!(err.to_string(), "NodeId(0) has no children to score");
    }
}
