//! Monte Carlo Tree Search over a `GameState`.
//!
//! ## Overview
//!
//! Plain two-player UCT with an arena-allocated tree:
//!
//! - **Selection**: descend through fully expanded nodes by UCB1
//! - **Expansion**: add the first untried action of the selected node
//! - **Simulation**: uniform random rollout scored by who can still move
//! - **Backpropagation**: walk to the root, flipping the reward's sign per ply
//!
//! Each node's reward is stored from the viewpoint of the player who moved
//! into it, so a parent always picks the child that is best for itself.
//!
//! ## Usage
//!
//! ```rust
//! use anytime_mcts::core::GameRng;
//! use anytime_mcts::games::payoff::PayoffTree;
//! use anytime_mcts::mcts::{MCTSConfig, MCTSSearch};
//!
//! let game = PayoffTree::uniform(3, 2);
//! let config = MCTSConfig::default();
//! let mut search = MCTSSearch::new(game, config, GameRng::new(7));
//!
//! let action = search.search(200).unwrap();
//! assert!(action < 3);
//! assert_eq!(search.tree().root_node().visits, 200);
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! let search = MCTSSearch::new(state, config, rng)
//!     .with_selection(MySelection)
//!     .with_simulation(MyRollout);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use policy::{best_child, RandomRollout, SelectionPolicy, SimulationPolicy, LOSS, UCB1, WIN};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
