//! # anytime-mcts
//!
//! An anytime Monte Carlo Tree Search move selector for two-player,
//! alternating, perfect-information games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The search only talks to positions through the
//!    `GameState` trait. Games supply legal actions, successors, terminal
//!    detection, and a liberty predicate.
//!
//! 2. **Anytime**: The player publishes its current best action after every
//!    iteration and keeps going until the caller cuts it off. Whatever was
//!    published last is the answer.
//!
//! 3. **Deterministic**: All randomness flows from a seeded `GameRng`, so a
//!    search with a given seed and iteration count is reproducible.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, error types
//! - `rules`: The `GameState` trait
//! - `mcts`: Tree, policies, and the search loop
//! - `agent`: The MCTS player, a random baseline, and action sinks
//! - `arena`: Timed two-player matches
//! - `games`: Knight's Isolation and a synthetic payoff tree

pub mod agent;
pub mod arena;
pub mod core;
pub mod games;
pub mod mcts;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, PlayerId, SearchError};

pub use crate::rules::{GameResult, GameState};

pub use crate::mcts::{
    MCTSConfig, MCTSNode, MCTSSearch, MCTSTree, NodeId, Edge,
    SearchStats, TreeStats,
    SelectionPolicy, SimulationPolicy,
    UCB1, RandomRollout,
};

pub use crate::agent::{
    ActionSink, AgentContext, AgentPhase, ChannelSink, LatestAction,
    MCTSPlayer, Player, RandomPlayer,
};

pub use crate::arena::{Arena, ArenaConfig, EndReason, MatchRecord};
