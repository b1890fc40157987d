//! Counters gathered while a search runs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-search counters. Reset by building a new search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u32,

    /// Nodes appended to the tree.
    pub nodes_expanded: u32,

    /// Iterations whose rollout started on a terminal node.
    pub terminal_hits: u32,

    /// Deepest node appended, root = 0.
    pub max_depth: u16,

    /// Wall time inside `iteration`, in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        f64::from(self.iterations) * 1_000_000.0 / self.time_us as f64
    }

    /// Fraction of iterations that added a node.
    #[must_use]
    pub fn expansion_rate(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        f64::from(self.nodes_expanded) / f64::from(self.iterations)
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations ({:.0}/s), {} nodes, depth {}, {} terminal",
            self.iterations,
            self.iterations_per_second(),
            self.nodes_expanded,
            self.max_depth,
            self.terminal_hits
        )
    }
}
