//! Knight's Isolation.
//!
//! Two knights on an 11x9 board:
//! - On their first move each player places their knight on any open cell
//! - Afterwards a knight jumps in one of the eight L-shaped directions
//! - Every cell a knight lands on is blocked for the rest of the game
//! - A player who cannot move on their turn loses

mod board;
mod game;

pub use board::{Cell, Direction, Move, CELLS, HEIGHT, WIDTH};
pub use game::Isolation;
