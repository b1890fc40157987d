//! Submission channels for published actions.
//!
//! The sink is the caller's side of the contract: it records what the
//! player publishes and decides when the player has run out of time.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Receives actions published by a player.
pub trait ActionSink<A> {
    /// Record `action` as the player's current choice.
    ///
    /// `ControlFlow::Break` tells the player it has been cut off and must
    /// return without publishing again.
    fn publish(&mut self, action: A) -> ControlFlow<()>;
}

#[derive(Clone, Copy, Debug)]
enum Limit {
    Publishes(u64),
    Deadline(Instant),
}

/// In-process sink that keeps the latest action.
///
/// Cuts the player off after a number of publishes or at a deadline.
///
/// ```
/// use std::ops::ControlFlow;
/// use anytime_mcts::agent::{ActionSink, LatestAction};
///
/// let mut sink = LatestAction::with_publish_limit(2);
/// assert_eq!(sink.publish('a'), ControlFlow::Continue(()));
/// assert_eq!(sink.publish('b'), ControlFlow::Break(()));
/// assert_eq!(sink.latest(), Some(&'b'));
/// ```
#[derive(Clone, Debug)]
pub struct LatestAction<A> {
    latest: Option<A>,
    published: u64,
    limit: Limit,
}

impl<A> LatestAction<A> {
    /// Cut off once `publishes` actions have been received.
    pub fn with_publish_limit(publishes: u64) -> Self {
        Self::with_limit(Limit::Publishes(publishes))
    }

    /// Cut off at the first publish at or after `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self::with_limit(Limit::Deadline(deadline))
    }

    /// Cut off at the first publish after `budget` from now.
    pub fn with_time_limit(budget: Duration) -> Self {
        Self::with_deadline(Instant::now() + budget)
    }

    fn with_limit(limit: Limit) -> Self {
        Self {
            latest: None,
            published: 0,
            limit,
        }
    }

    /// The most recently published action.
    #[must_use]
    pub fn latest(&self) -> Option<&A> {
        self.latest.as_ref()
    }

    /// Take the most recently published action.
    pub fn into_latest(self) -> Option<A> {
        self.latest
    }

    /// Number of actions published so far.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl<A> ActionSink<A> for LatestAction<A> {
    fn publish(&mut self, action: A) -> ControlFlow<()> {
        self.latest = Some(action);
        self.published += 1;

        let expired = match self.limit {
            Limit::Publishes(limit) => self.published >= limit,
            Limit::Deadline(deadline) => Instant::now() >= deadline,
        };
        if expired {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Cross-thread sink: forwards actions over a channel until stopped.
///
/// The receiving side raises the stop flag when its deadline passes.
/// Actions offered after that are dropped, not sent.
#[derive(Debug)]
pub struct ChannelSink<A> {
    tx: Sender<A>,
    stop: Arc<AtomicBool>,
}

impl<A> ChannelSink<A> {
    pub fn new(tx: Sender<A>, stop: Arc<AtomicBool>) -> Self {
        Self { tx, stop }
    }
}

impl<A> ActionSink<A> for ChannelSink<A> {
    fn publish(&mut self, action: A) -> ControlFlow<()> {
        if self.stop.load(Ordering::Acquire) {
            return ControlFlow::Break(());
        }
        match self.tx.send(action) {
            Ok(()) => ControlFlow::Continue(()),
            // Receiver gone: nobody is listening any more.
            Err(_) => ControlFlow::Break(()),
        }
    }
}
