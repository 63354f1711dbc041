//! Error types.
//!
//! Every rejection is locally recoverable: a rejected operation leaves the
//! match untouched and the caller decides how to surface the message.

use thiserror::Error;

use super::side::Side;
use crate::cards::CardId;

/// A battle operation that was refused.
#[derive(Debug, Error)]
pub enum BattleError {
    /// A side tried to act outside its turn.
    #[error("not your turn: {attempted} attempted to act during the {current}'s turn")]
    InvalidTurn { attempted: Side, current: Side },

    /// The card costs more mana than the side has.
    #[error("not enough mana: need {required}, have {available} ({} short)", .required.saturating_sub(*.available))]
    InsufficientMana { required: u32, available: u32 },

    /// The card id is not in the acting side's hand.
    #[error("card {0} is not in hand")]
    CardNotInHand(CardId),

    /// The match has not started or has already ended.
    #[error("match is not in progress")]
    MatchNotInProgress,

    /// Boost stakes must be positive.
    #[error("invalid boost stake: {0}")]
    InvalidStake(u32),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl BattleError {
    /// Short machine-readable kind, for UI notification styling.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            BattleError::InvalidTurn { .. } => "invalid_turn",
            BattleError::InsufficientMana { .. } => "insufficient_mana",
            BattleError::CardNotInHand(_) => "card_not_in_hand",
            BattleError::MatchNotInProgress => "match_not_in_progress",
            BattleError::InvalidStake(_) => "invalid_stake",
            BattleError::Snapshot(_) => "snapshot",
        }
    }
}

/// A configuration that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
