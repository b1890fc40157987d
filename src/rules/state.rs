//! The `GameState` trait: everything the search needs to know about a game.

use std::fmt::Debug;

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Neither or both players kept their liberties.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// An immutable game position.
///
/// ## Implementation Notes
///
/// - `apply` must be deterministic and must not mutate `self`
/// - `legal_actions` must enumerate in a stable order; the search expands
///   untried actions in that order
/// - `apply` is only ever called with an action from `legal_actions`
/// - `has_liberties` is only consulted on terminal positions
pub trait GameState: Clone {
    /// A move in this game.
    type Action: Clone + Eq + Debug;

    /// Legal actions for the player to move.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Whether the game is over.
    fn is_terminal(&self) -> bool;

    /// The successor position after the player to move plays `action`.
    fn apply(&self, action: &Self::Action) -> Self;

    /// The player to move.
    fn active_player(&self) -> PlayerId;

    /// Whether `player` could still move from this position.
    fn has_liberties(&self, player: PlayerId) -> bool;

    /// Number of plies played since the start of the game.
    fn ply_count(&self) -> u32;

    /// Outcome of a terminal position, `None` while the game continues.
    ///
    /// The default reads the liberty predicate: the player who kept their
    /// liberties wins.
    fn result(&self) -> Option<GameResult> {
        if !self.is_terminal() {
            return None;
        }
        let active = self.active_player();
        let result = match (self.has_liberties(active), self.has_liberties(active.opponent())) {
            (true, false) => GameResult::Winner(active),
            (false, true) => GameResult::Winner(active.opponent()),
            _ => GameResult::Draw,
        };
        Some(result)
    }
}
