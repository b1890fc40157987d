//! Synthetic complete game tree with a fixed winner at every leaf.
//!
//! Useful wherever the game-theoretic value must be known exactly: every
//! interior node has `branching` actions, every leaf sits at `depth`, and
//! the leaf winner table is indexed by the path read as a base-`branching`
//! number.
//!
//! ```
//! use anytime_mcts::core::PlayerId;
//! use anytime_mcts::games::payoff::PayoffTree;
//!
//! let (f, s) = (PlayerId::FIRST, PlayerId::SECOND);
//! let game = PayoffTree::new(2, 2, vec![f, s, f, f]);
//!
//! // Action 1 wins whatever the reply.
//! assert_eq!(game.minimax_action(), Some(1));
//! ```

use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::PlayerId;
use crate::rules::GameState;

/// A position in a complete payoff tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayoffTree {
    branching: usize,
    depth: usize,
    winners: Arc<[PlayerId]>,
    path: SmallVec<[usize; 8]>,
    start_ply: u32,
}

impl PayoffTree {
    /// Create a tree with `branching` actions per node and leaves at `depth`.
    ///
    /// Panics if `winners` does not hold exactly `branching^depth` entries.
    pub fn new(branching: usize, depth: usize, winners: Vec<PlayerId>) -> Self {
        assert!(branching > 0, "branching must be positive");
        assert_eq!(
            winners.len(),
            branching.pow(depth as u32),
            "winner table must have branching^depth entries"
        );
        Self {
            branching,
            depth,
            winners: winners.into(),
            path: SmallVec::new(),
            start_ply: 0,
        }
    }

    /// A tree where the first player wins every leaf.
    pub fn uniform(branching: usize, depth: usize) -> Self {
        Self::new(branching, depth, vec![PlayerId::FIRST; branching.pow(depth as u32)])
    }

    /// Offset the ply counter, e.g. to get past a shallow-game cutoff.
    ///
    /// Keeps the first player to move at the root by rounding odd offsets up.
    pub fn with_start_ply(mut self, ply: u32) -> Self {
        self.start_ply = ply + ply % 2;
        self
    }

    /// Actions taken from the root to reach this position.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Winner of the leaf reached by this position's path.
    ///
    /// `None` before the leaves.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_terminal() {
            return None;
        }
        let index = self.path.iter().fold(0, |acc, &a| acc * self.branching + a);
        Some(self.winners[index])
    }

    /// The optimal action for the player to move, first on ties.
    ///
    /// `None` on a leaf.
    #[must_use]
    pub fn minimax_action(&self) -> Option<usize> {
        let me = self.active_player();
        let mut fallback = None;
        for action in self.legal_actions() {
            if self.apply(&action).minimax_winner() == me {
                return Some(action);
            }
            fallback.get_or_insert(action);
        }
        fallback
    }

    fn minimax_winner(&self) -> PlayerId {
        if let Some(winner) = self.winner() {
            return winner;
        }
        let me = self.active_player();
        if self.legal_actions().iter().any(|a| self.apply(a).minimax_winner() == me) {
            me
        } else {
            me.opponent()
        }
    }
}

impl GameState for PayoffTree {
    type Action = usize;

    fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            Vec::new()
        } else {
            (0..self.branching).collect()
        }
    }

    fn is_terminal(&self) -> bool {
        self.path.len() >= self.depth
    }

    fn apply(&self, action: &usize) -> Self {
        let mut next = self.clone();
        next.path.push(*action);
        next
    }

    fn active_player(&self) -> PlayerId {
        PlayerId::for_ply(self.ply_count())
    }

    fn has_liberties(&self, player: PlayerId) -> bool {
        self.winner().map_or(true, |w| w == player)
    }

    fn ply_count(&self) -> u32 {
        self.start_ply + self.path.len() as u32
    }
}
