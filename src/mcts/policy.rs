//! MCTS policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to score children when descending (UCB1)
//! - `SimulationPolicy`: How to run rollouts (uniform random)

use crate::core::{GameRng, SearchError};
use crate::rules::GameState;

use super::config::MCTSConfig;
use super::node::NodeId;
use super::tree::MCTSTree;

/// Reward for the player who moved into a node whose player to move won.
pub const LOSS: f64 = -1.0;

/// Reward for the player who moved into a node whose player to move lost.
pub const WIN: f64 = 1.0;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for scoring a child during selection.
///
/// Scores are only ever requested for children with at least one visit,
/// so implementations may divide by `child_visits` freely.
pub trait SelectionPolicy: Send + Sync {
    /// Score a child from its statistics and its parent's visit count.
    fn score(&self, parent_visits: u32, child_visits: u32, child_reward: f64, config: &MCTSConfig) -> f64;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high reward) with exploration (low visits).
/// Formula: R(c)/N(c) + C * sqrt(ln N(p) / N(c))
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn score(&self, parent_visits: u32, child_visits: u32, child_reward: f64, config: &MCTSConfig) -> f64 {
        let n = child_visits as f64;
        let exploitation = child_reward / n;
        let exploration = config.exploration_constant * ((parent_visits as f64).ln() / n).sqrt();
        exploitation + exploration
    }
}

/// The child of `node` with the highest score.
///
/// Ties go to the first maximal child in expansion order. Fails if the
/// node has no children or any child is unvisited.
pub fn best_child<S: GameState>(
    tree: &MCTSTree<S>,
    node: NodeId,
    policy: &dyn SelectionPolicy,
    config: &MCTSConfig,
) -> Result<NodeId, SearchError> {
    let parent_visits = tree.get(node).visits;
    let mut best: Option<(NodeId, f64)> = None;

    for child in tree.children(node) {
        let stats = tree.get(child);
        if stats.visits == 0 {
            return Err(SearchError::UnvisitedChild { parent: node, child });
        }
        let score = policy.score(parent_visits, stats.visits, stats.reward, config);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((child, score)),
        }
    }

    best.map(|(child, _)| child)
        .ok_or(SearchError::EmptyChildren(node))
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a freshly selected node.
pub trait SimulationPolicy<S: GameState>: Send + Sync {
    /// Play out from `state` and return the reward for the player who
    /// moved into it.
    fn simulate(&self, state: &S, rng: &mut GameRng) -> Result<f64, SearchError>;
}

/// Random simulation policy.
///
/// Plays uniformly random legal actions until terminal, then scores the
/// final position with the liberty predicate of the player who was to move
/// at the start. A non-terminal position without legal actions is an
/// inconsistent oracle and fails with `SearchError::DeadEnd`.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl<S: GameState> SimulationPolicy<S> for RandomRollout {
    fn simulate(&self, state: &S, rng: &mut GameRng) -> Result<f64, SearchError> {
        let player = state.active_player();
        let mut current = state.clone();

        while !current.is_terminal() {
            let actions = current.legal_actions();
            let Some(action) = rng.choose(&actions) else {
                return Err(SearchError::DeadEnd {
                    ply: current.ply_count(),
                });
            };
            current = current.apply(action);
        }

        Ok(if current.has_liberties(player) { LOSS } else { WIN })
    }
}
