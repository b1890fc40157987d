//! Game implementations.
//!
//! - `isolation`: Knight's Isolation, the game the agent is built to play
//! - `payoff`: synthetic payoff trees with known game-theoretic values

pub mod isolation;
pub mod payoff;
