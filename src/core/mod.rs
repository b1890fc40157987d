//! Core types shared by the search, the players, and the games:
//! player identity, the seedable RNG, and the error taxonomy.

pub mod error;
pub mod player;
pub mod rng;

pub use error::SearchError;
pub use player::PlayerId;
pub use rng::{GameRng, GameRngState};
