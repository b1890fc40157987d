//! The anytime MCTS player.
//!
//! Each call builds a fresh tree from the given position and iterates
//! until the sink cuts it off, publishing the best root action after
//! every iteration. Nothing from the tree survives the call.

use log::debug;

use crate::core::{GameRng, SearchError};
use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};
use crate::rules::GameState;

use super::context::AgentContext;
use super::submission::ActionSink;
use super::Player;

/// Where the player is within its current top-level call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentPhase {
    /// No tree has been built for this call.
    NotStarted,
    /// A tree is being grown and actions are being published.
    Iterating,
    /// The call has returned.
    Done,
}

/// MCTS player with UCB1 selection and random rollouts.
#[derive(Clone, Debug)]
pub struct MCTSPlayer {
    config: MCTSConfig,
    rng: GameRng,
    phase: AgentPhase,
    turns: u32,
    last_stats: Option<SearchStats>,
}

impl MCTSPlayer {
    pub fn new(config: MCTSConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            config,
            phase: AgentPhase::NotStarted,
            turns: 0,
            last_stats: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    /// Statistics of the last call's search.
    ///
    /// `None` when the last call skipped the search.
    #[must_use]
    pub fn last_stats(&self) -> Option<&SearchStats> {
        self.last_stats.as_ref()
    }

    fn random_action<S: GameState>(&mut self, state: &S) -> Result<S::Action, SearchError> {
        let actions = state.legal_actions();
        self.rng.choose(&actions).cloned().ok_or(SearchError::NoLegalActions)
    }

    fn iterate<S: GameState>(
        &mut self,
        search: &mut MCTSSearch<S>,
        state: &S,
        sink: &mut dyn ActionSink<S::Action>,
    ) -> Result<(), SearchError> {
        loop {
            if search.tree().root_node().is_terminal {
                let action = self.random_action(state)?;
                let _ = sink.publish(action);
                return Ok(());
            }

            search.iteration()?;
            let action = search.best_action()?;
            if sink.publish(action).is_break() {
                return Ok(());
            }
        }
    }
}

impl Default for MCTSPlayer {
    fn default() -> Self {
        Self::new(MCTSConfig::default())
    }
}

impl<S: GameState> Player<S> for MCTSPlayer {
    fn name(&self) -> &str {
        "mcts"
    }

    fn get_action(&mut self, state: &S, sink: &mut dyn ActionSink<S::Action>) -> Result<(), SearchError> {
        self.phase = AgentPhase::NotStarted;
        self.last_stats = None;
        self.turns += 1;

        if state.is_terminal() || state.ply_count() < self.config.shallow_ply_limit {
            let action = self.random_action(state)?;
            debug!("ply {}: skipping search, random action {:?}", state.ply_count(), action);
            let _ = sink.publish(action);
            self.phase = AgentPhase::Done;
            return Ok(());
        }

        let mut search = MCTSSearch::new(state.clone(), self.config.clone(), self.rng.fork());
        self.phase = AgentPhase::Iterating;
        let outcome = self.iterate(&mut search, state, sink);
        self.phase = AgentPhase::Done;

        let stats = search.stats();
        debug!("ply {}: cut off after {}", state.ply_count(), stats);
        self.last_stats = Some(stats.clone());
        outcome
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
