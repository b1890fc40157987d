//! State oracle trait for game implementations.
//!
//! Games implement `GameState` to define:
//! - Legal actions for each position
//! - How actions produce successor positions
//! - Terminal detection and the liberty predicate used to score rollouts
//!
//! The search calls into `GameState` but never interprets
//! game-specific concepts directly.

pub mod state;

pub use state::{GameResult, GameState};
