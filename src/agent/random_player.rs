//! Baseline player that publishes one uniformly random legal action.

use log::debug;

use crate::core::{GameRng, SearchError};
use crate::rules::GameState;

use super::context::AgentContext;
use super::submission::ActionSink;
use super::Player;

#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
    turns: u32,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            turns: 0,
        }
    }
}

impl<S: GameState> Player<S> for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn get_action(&mut self, state: &S, sink: &mut dyn ActionSink<S::Action>) -> Result<(), SearchError> {
        self.turns += 1;
        let actions = state.legal_actions();
        let action = self.rng.choose(&actions).cloned().ok_or(SearchError::NoLegalActions)?;
        debug!("ply {}: random player picks {:?}", state.ply_count(), action);
        let _ = sink.publish(action);
        Ok(())
    }

    fn context(&self) -> Option<AgentContext> {
        Some(AgentContext {
            rng: self.rng.state(),
            turns: self.turns,
        })
    }

    fn set_context(&mut self, context: Option<AgentContext>) {
        if let Some(context) = context {
            self.rng = GameRng::from_state(&context.rng);
            self.turns = context.turns;
        }
    }
}
