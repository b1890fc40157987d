//! Cross-turn player context.
//!
//! The caller may persist a player's context between turns and hand it
//! back before the next one. Players must work the same whether or not
//! that happens; the MCTS player only uses it to resume its random stream.

use serde::{Deserialize, Serialize};

use crate::core::{GameRngState, SearchError};

/// Opaque state a player carries between top-level calls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    /// RNG position after the last turn.
    pub rng: GameRngState,

    /// Turns played so far.
    pub turns: u32,
}

impl AgentContext {
    /// Encode for storage by the caller.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SearchError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SearchError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    #[test]
    fn test_bytes_round_trip() {
        let context = AgentContext {
            rng: GameRng::new(9).state(),
            turns: 4,
        };

        let bytes = context.to_bytes().unwrap();
        assert_eq!(AgentContext::from_bytes(&bytes).unwrap(), context);
    }

    #[test]
    fn test_garbage_bytes_fail() {
        let err = AgentContext::from_bytes(&[1, 2]).unwrap_err();
        assert!(matches!(err, SearchError::Context(_)));
    }
}
