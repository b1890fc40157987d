//! Players: the anytime MCTS agent and a random baseline.
//!
//! A player receives a position and an `ActionSink`. It may publish any
//! number of actions; the caller keeps only the most recent one published
//! before it cut the player off. The MCTS player never stops on its own:
//! it keeps improving its answer until the sink reports the cut-off.

pub mod context;
pub mod mcts_player;
pub mod random_player;
pub mod submission;

pub use context::AgentContext;
pub use mcts_player::{AgentPhase, MCTSPlayer};
pub use random_player::RandomPlayer;
pub use submission::{ActionSink, ChannelSink, LatestAction};

use crate::core::SearchError;
use crate::rules::GameState;

/// Something that picks moves for one side of a game.
pub trait Player<S: GameState> {
    /// Short label for logs and match records.
    fn name(&self) -> &str;

    /// Publish one or more actions for `state` to `sink`.
    ///
    /// Returns once the sink signals the cut-off or the player has nothing
    /// better to offer. An error means no further publish will happen.
    fn get_action(&mut self, state: &S, sink: &mut dyn ActionSink<S::Action>) -> Result<(), SearchError>;

    /// State the player wants carried to its next turn.
    fn context(&self) -> Option<AgentContext> {
        None
    }

    /// Restore state saved by `context`. `None` leaves the player as is.
    fn set_context(&mut self, _context: Option<AgentContext>) {}
}
