//! Seedable randomness for rollouts and random move choices.
//!
//! A player owns one long-lived `GameRng`. Each search gets a child stream
//! from `fork`, so the number of iterations a search happens to run does
//! not shift the player's own stream.
//!
//! ```
//! use anytime_mcts::core::GameRng;
//!
//! let mut player_a = GameRng::new(42);
//! let mut player_b = GameRng::new(42);
//!
//! let mut search_a = player_a.fork();
//! let mut search_b = player_b.fork();
//! assert_eq!(search_a.gen_index(1000), search_b.gen_index(1000));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment spreading fork seeds apart.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream with a recorded seed, so it can be saved and resumed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Derive a child stream. Successive forks get distinct seeds; the
    /// parent stream itself is not advanced.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    /// Uniform index in `0..len`. Panics if `len` is zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniformly random element, `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Snapshot the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.forks,
        }
    }

    /// Resume a stream saved with `state`.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            forks: state.fork_counter,
        }
    }
}

/// Saved position of a `GameRng`.
///
/// The ChaCha word position makes this constant-size however far the
/// stream has advanced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
    pub fork_counter: u64,
}
