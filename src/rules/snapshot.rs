//! Match snapshots.
//!
//! A snapshot is the full match state plus the position of the engine's
//! RNG stream, encoded with bincode. Restoring one resumes the match
//! exactly: the opponent makes the same choices it would have made.

use serde::{Deserialize, Serialize};

use crate::core::{BattleError, BattleRngState, MatchState};

/// Everything needed to resume a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub state: MatchState,
    pub rng: BattleRngState,
}

impl MatchSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, BattleError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, BattleError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
