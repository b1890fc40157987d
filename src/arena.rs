//! Two-player matches under a per-turn time limit.
//!
//! Each turn runs the player's `get_action` on a scoped worker thread with
//! a `ChannelSink`. The arena collects published actions until the time
//! limit passes or the player returns, raises the stop flag, joins the
//! worker, and plays the last action it received. A turn that yields no
//! action, an illegal action, or an error forfeits the game.
//!
//! Player contexts are kept by the arena between turns and handed back,
//! the way a tournament harness would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::agent::{AgentContext, ChannelSink, Player};
use crate::core::PlayerId;
use crate::rules::{GameResult, GameState};

/// Match parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Wall-clock budget for each turn.
    pub time_limit: Duration,

    /// Turns after which the match is called with no winner.
    pub max_turns: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_millis(150),
            max_turns: 1000,
        }
    }
}

impl ArenaConfig {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The game reached a terminal position.
    Normal,
    /// A player published nothing usable in time, or failed.
    Forfeit,
    /// `max_turns` was reached.
    TurnLimit,
}

/// Outcome of a match.
#[derive(Clone, Debug)]
pub struct MatchRecord<S: GameState> {
    /// Actions played, in order.
    pub moves: Vec<S::Action>,

    /// Position when the match ended.
    pub final_state: S,

    /// `None` for draws and turn-limit endings.
    pub winner: Option<PlayerId>,

    pub reason: EndReason,
}

/// Runs matches between two players.
#[derive(Clone, Debug, Default)]
pub struct Arena {
    config: ArenaConfig,
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Play one match from `initial`. `players[0]` moves first.
    pub fn play<S>(&self, initial: S, mut players: [&mut (dyn Player<S> + Send); 2]) -> MatchRecord<S>
    where
        S: GameState + Sync,
        S::Action: Send,
    {
        let mut state = initial;
        let mut moves = Vec::new();
        let mut contexts: [Option<AgentContext>; 2] = [None, None];

        info!("match start: {} vs {}", players[0].name(), players[1].name());

        for _ in 0..self.config.max_turns {
            if let Some(result) = state.result() {
                return Self::finished(moves, state, result);
            }

            let mover = state.active_player();
            let player = &mut *players[mover.index()];
            player.set_context(contexts[mover.index()].take());
            let action = self.turn(&mut *player, &state);
            contexts[mover.index()] = player.context();

            match action {
                Some(action) if state.legal_actions().contains(&action) => {
                    info!("ply {}: {} plays {:?}", state.ply_count(), mover, action);
                    state = state.apply(&action);
                    moves.push(action);
                }
                other => {
                    warn!("{} ({}) forfeits with {:?}", mover, player.name(), other);
                    return MatchRecord {
                        moves,
                        final_state: state,
                        winner: Some(mover.opponent()),
                        reason: EndReason::Forfeit,
                    };
                }
            }
        }

        // The last permitted turn may itself have ended the game.
        if let Some(result) = state.result() {
            return Self::finished(moves, state, result);
        }

        info!("match stopped at the turn limit of {}", self.config.max_turns);
        MatchRecord {
            moves,
            final_state: state,
            winner: None,
            reason: EndReason::TurnLimit,
        }
    }

    fn finished<S: GameState>(moves: Vec<S::Action>, state: S, result: GameResult) -> MatchRecord<S> {
        let winner = match result {
            GameResult::Winner(p) => Some(p),
            GameResult::Draw => None,
        };
        info!("match over after {} plies, winner {:?}", moves.len(), winner);
        MatchRecord {
            moves,
            final_state: state,
            winner,
            reason: EndReason::Normal,
        }
    }

    /// Run one turn; the last action received before the deadline, if any.
    fn turn<S>(&self, player: &mut (dyn Player<S> + Send), state: &S) -> Option<S::Action>
    where
        S: GameState + Sync,
        S::Action: Send,
    {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let deadline = Instant::now() + self.config.time_limit;

        thread::scope(|scope| {
            let worker_stop = Arc::clone(&stop);
            let worker = scope.spawn(move || {
                let mut sink = ChannelSink::new(tx, worker_stop);
                let outcome = player.get_action(state, &mut sink);
                (player.name().to_owned(), outcome)
            });

            let mut latest = None;
            loop {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                match rx.recv_timeout(deadline - now) {
                    Ok(action) => latest = Some(action),
                    Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
                }
            }
            stop.store(true, Ordering::Release);
            // Anything already queued was published before the cut-off.
            if let Some(action) = rx.try_iter().last() {
                latest = Some(action);
            }

            match worker.join() {
                Ok((_, Ok(()))) => latest,
                Ok((name, Err(err))) => {
                    warn!("{} failed: {}", name, err);
                    None
                }
                Err(_) => {
                    warn!("player thread panicked");
                    None
                }
            }
        })
    }
}
