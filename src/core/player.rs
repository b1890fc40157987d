//! Player identification for two-player alternating games.
//!
//! Player indices are 0-based: the player who moves first is
//! `PlayerId::FIRST`, and turns alternate strictly between the two.

use serde::{Deserialize, Serialize};

/// Player identifier for a two-player game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who moves on even plies.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who moves on odd plies.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "PlayerId must be 0 or 1");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// The player to move at a given ply.
    #[must_use]
    pub const fn for_ply(ply: u32) -> Self {
        Self((ply % 2) as u8)
    }

    /// Iterate over both player IDs.
    ///
    /// ```
    /// use anytime_mcts::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
