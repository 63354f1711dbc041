//! Structured battle events.
//!
//! Every state-changing step of a match appends one `EventRecord` to the
//! match history, alongside the human-readable battle log. Records are
//! used for:
//! - Verifying engine behavior in tests without parsing log strings
//! - Replay/debugging
//! - Settling rewards at match end

use serde::{Deserialize, Serialize};

use super::side::Side;
use super::state::MatchOutcome;
use crate::cards::CardId;
use crate::effects::Resolution;

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// Counters reset, player to act.
    MatchStarted,

    /// A card resolved.
    CardPlayed {
        card_id: CardId,
        resolution: Resolution,
    },

    /// The side had cards but none it could afford; its turn was skipped.
    NoPlayableCard,

    /// The side had to act with an empty hand.
    Fatigue { damage: u32 },

    /// The player passed voluntarily.
    TurnEnded,

    /// A staking boost was applied to the player's hand.
    BoostActivated { percentage: u32, turns: u32 },

    /// The boost ran out and cards were restored.
    BoostExpired,

    /// The match is over.
    MatchEnded(MatchOutcome),
}

/// A recorded event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The side the event concerns.
    pub side: Side,

    /// The event.
    pub event: BattleEvent,

    /// Turn number when the event happened.
    pub turn: u32,

    /// Global sequence number (for ordering).
    pub sequence: u32,
}

impl EventRecord {
    #[must_use]
    pub fn new(side: Side, event: BattleEvent, turn: u32, sequence: u32) -> Self {
        Self {
            side,
            event,
            turn,
            sequence,
        }
    }

    /// Is this a turn that passed without a card being played?
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(
            self.event,
            BattleEvent::NoPlayableCard | BattleEvent::Fatigue { .. }
        )
    }
}
