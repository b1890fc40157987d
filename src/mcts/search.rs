//! Core MCTS search algorithm.
//!
//! One `MCTSSearch` owns one tree rooted at the position of a single
//! top-level call. Each iteration selects (expanding at most one node),
//! rolls out from the selected node, and backpropagates the reward with
//! the sign flipped at every ply.

use std::time::Instant;

use log::trace;

use crate::core::{GameRng, SearchError};
use crate::rules::GameState;

use super::config::MCTSConfig;
use super::node::NodeId;
use super::policy::{best_child, RandomRollout, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Generic over the position type. Owns the search tree, the RNG used by
/// rollouts, and the policies.
pub struct MCTSSearch<S: GameState> {
    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree<S>,

    /// RNG for simulations.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<S>>,

    /// Search statistics.
    stats: SearchStats,
}

impl<S: GameState> MCTSSearch<S> {
    /// Create a search whose tree is rooted at `state`.
    pub fn new(state: S, config: MCTSConfig, rng: GameRng) -> Self {
        Self {
            tree: MCTSTree::with_capacity(state, config.node_capacity),
            config,
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomRollout),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<P: SelectionPolicy + 'static>(mut self, selection: P) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<P: SimulationPolicy<S> + 'static>(mut self, simulation: P) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Run a fixed number of iterations and return the best root action.
    pub fn search(&mut self, iterations: u32) -> Result<S::Action, SearchError> {
        for _ in 0..iterations {
            self.iteration()?;
        }
        self.best_action()
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    ///
    /// Returns the node the rollout started from.
    pub fn iteration(&mut self) -> Result<NodeId, SearchError> {
        let start = Instant::now();

        let leaf = self.select(self.tree.root())?;
        if self.tree.get(leaf).is_terminal {
            self.stats.terminal_hits += 1;
        }
        let reward = self.simulate(leaf)?;
        self.backpropagate(leaf, reward);

        self.stats.iterations += 1;
        self.stats.time_us += start.elapsed().as_micros() as u64;
        Ok(leaf)
    }

    /// Descend from `node` to the node to roll out from.
    ///
    /// Expands and returns the first node met that still has untried
    /// actions; otherwise follows the best-scoring child. Stops on
    /// terminal nodes.
    pub fn select(&mut self, node: NodeId) -> Result<NodeId, SearchError> {
        let mut current = node;
        loop {
            let n = self.tree.get(current);
            if n.is_terminal {
                return Ok(current);
            }
            if !n.is_fully_expanded() {
                return self.expand(current);
            }
            current = best_child(&self.tree, current, self.selection.as_ref(), &self.config)?;
        }
    }

    /// Add a child for the first untried action of `node`.
    pub fn expand(&mut self, node: NodeId) -> Result<NodeId, SearchError> {
        let action = self
            .tree
            .untried_action(node)
            .ok_or(SearchError::FullyExpanded(node))?;

        let child = self.tree.add_child(node, action)?;
        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.tree.get(child).depth);
        Ok(child)
    }

    /// Roll out from the position at `node`.
    pub fn simulate(&mut self, node: NodeId) -> Result<f64, SearchError> {
        self.simulation.simulate(&self.tree.get(node).state, &mut self.rng)
    }

    /// Add `reward` at `node` and its ancestors, negating it at each step up.
    pub fn backpropagate(&mut self, node: NodeId, reward: f64) {
        let mut current = node;
        let mut reward = reward;
        loop {
            let n = self.tree.get_mut(current);
            n.reward += reward;
            n.visits += 1;
            reward = -reward;

            if n.parent.is_none() {
                break;
            }
            current = n.parent;
        }
        trace!("backpropagated from {} to root", node);
    }

    /// The root action whose child currently scores highest.
    pub fn best_action(&self) -> Result<S::Action, SearchError> {
        let root = self.tree.root();
        let best = best_child(&self.tree, root, self.selection.as_ref(), &self.config)?;
        self.tree
            .root_node()
            .children
            .iter()
            .find(|e| e.child == best)
            .map(|e| e.action.clone())
            .ok_or(SearchError::EmptyChildren(root))
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree<S> {
        &self.tree
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Visit count per expanded root action.
    pub fn action_visits(&self) -> Vec<(S::Action, u32)> {
        self.tree
            .root_node()
            .children
            .iter()
            .map(|e| (e.action.clone(), self.tree.get(e.child).visits))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::games::payoff::PayoffTree;

    fn search_over(game: PayoffTree, seed: u64) -> MCTSSearch<PayoffTree> {
        MCTSSearch::new(game, MCTSConfig::default(), GameRng::new(seed))
    }

    #[test]
    fn test_first_iteration_expands_root() {
        let mut search = search_over(PayoffTree::uniform(3, 2), 1);

        let leaf = search.iteration().unwrap();

        assert_eq!(search.tree().len(), 2);
        assert_eq!(search.tree().get(leaf).parent, search.tree().root());
        assert_eq!(search.tree().root_node().visits, 1);
        assert_eq!(search.tree().get(leaf).visits, 1);
    }

    #[test]
    fn test_select_expands_in_action_order_before_descending() {
        let mut search = search_over(PayoffTree::uniform(3, 2), 1);

        for expected in 0..3 {
            let leaf = search.iteration().unwrap();
            assert_eq!(search.tree().get(leaf).depth, 1);
            assert_eq!(search.tree().root_node().children[expected].child, leaf);
            assert_eq!(search.tree().root_node().children[expected].action, expected);
        }

        // Root is now fully expanded; the next iteration goes one level deeper.
        let leaf = search.iteration().unwrap();
        assert_eq!(search.tree().get(leaf).depth, 2);
    }

    #[test]
    fn test_expand_fully_expanded_fails_fast() {
        let mut search = search_over(PayoffTree::uniform(2, 2), 1);
        let root = search.tree().root();
        search.expand(root).unwrap();
        search.expand(root).unwrap();

        let err = search.expand(root).unwrap_err();
        assert!(matches!(err, SearchError::FullyExpanded(id) if id == root));
    }

    #[test]
    fn test_backpropagate_alternates_sign() {
        let mut search = search_over(PayoffTree::uniform(2, 4), 1);
        let mut path = vec![search.tree().root()];
        for _ in 0..4 {
            let child = search.expand(*path.last().unwrap()).unwrap();
            path.push(child);
        }

        let leaf = *path.last().unwrap();
        search.backpropagate(leaf, 1.0);

        for (i, &node) in path.iter().rev().enumerate() {
            let expected = if i % 2 == 0 { 1.0 } else { -1.0 };
            assert_eq!(search.tree().get(node).reward, expected);
            assert_eq!(search.tree().get(node).visits, 1);
        }
    }

    #[test]
    fn test_visit_counts_match_iterations() {
        let mut search = search_over(PayoffTree::uniform(3, 3), 9);
        let iterations = 200;

        for _ in 0..iterations {
            search.iteration().unwrap();
        }

        let tree = search.tree();
        assert_eq!(tree.root_node().visits, iterations);

        for (id, node) in tree.iter() {
            let below: u32 = tree.children(id).map(|c| tree.get(c).visits).sum();
            if node.is_root() {
                assert_eq!(node.visits, below);
            } else if node.is_terminal {
                assert!(node.visits >= 1);
            } else {
                // Rolled out from exactly once, when it was created.
                assert_eq!(node.visits, 1 + below);
            }
        }
    }

    #[test]
    fn test_best_action_after_iterations_is_legal() {
        let mut search = search_over(PayoffTree::uniform(4, 3), 3);

        let action = search.search(50).unwrap();

        assert!(search.tree().root_node().legal_actions.contains(&action));
        assert_eq!(search.stats().iterations, 50);
        assert!(search.stats().nodes_expanded > 0);
    }

    #[test]
    fn test_best_action_before_any_iteration_fails() {
        let search = search_over(PayoffTree::uniform(2, 2), 1);
        let err = search.best_action().unwrap_err();
        assert!(matches!(err, SearchError::EmptyChildren(_)));
    }

    #[test]
    fn test_terminal_root_is_rolled_out_in_place() {
        let leaf = PayoffTree::uniform(2, 1).apply(&0);
        let mut search = search_over(leaf, 1);

        let selected = search.iteration().unwrap();

        assert_eq!(selected, search.tree().root());
        assert_eq!(search.tree().len(), 1);
        assert_eq!(search.stats().terminal_hits, 1);
        assert!(search.best_action().is_err());
    }

    #[test]
    fn test_search_deterministic() {
        let game = PayoffTree::new(3, 2, vec![PlayerId::FIRST, PlayerId::SECOND, PlayerId::FIRST,
                                              PlayerId::SECOND, PlayerId::SECOND, PlayerId::FIRST,
                                              PlayerId::FIRST, PlayerId::FIRST, PlayerId::SECOND]);

        let mut search1 = search_over(game.clone(), 12345);
        let mut search2 = search_over(game, 12345);

        let action1 = search1.search(100).unwrap();
        let action2 = search2.search(100).unwrap();

        assert_eq!(action1, action2);
        assert_eq!(search1.action_visits(), search2.action_visits());
    }

    #[test]
    fn test_finds_only_winning_move() {
        // Only action 2 wins outright for the first player.
        let game = PayoffTree::new(3, 1, vec![PlayerId::SECOND, PlayerId::SECOND, PlayerId::FIRST]);
        let mut search = search_over(game, 5);

        assert_eq!(search.search(60).unwrap(), 2);
    }
}
