//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MCTSConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// With the default, the bonus is sqrt(2 ln N / n).
    pub exploration_constant: f64,

    /// Random seed for the player's RNG.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Positions with fewer plies than this skip the search and get a
    /// random legal action.
    pub shallow_ply_limit: u32,

    /// Nodes reserved up front in the tree arena.
    /// The arena still grows past this; it only avoids early reallocations.
    pub node_capacity: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            seed: 42,
            shallow_ply_limit: 2,
            node_capacity: 4096,
        }
    }
}

impl MCTSConfig {
    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom shallow-game cutoff.
    pub fn with_shallow_ply_limit(mut self, plies: u32) -> Self {
        self.shallow_ply_limit = plies;
        self
    }

    /// Create a new config with a custom arena reservation.
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MCTSConfig::default();
        assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 0.001);
        assert_eq!(config.seed, 42);
        assert_eq!(config.shallow_ply_limit, 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MCTSConfig::default()
            .with_exploration(2.0)
            .with_seed(123)
            .with_shallow_ply_limit(0)
            .with_node_capacity(16);

        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.shallow_ply_limit, 0);
        assert_eq!(config.node_capacity, 16);
    }

    #[test]
    fn test_serialization() {
        let config = MCTSConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MCTSConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
