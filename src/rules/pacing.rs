//! Presentation pacing.
//!
//! The engine is fully synchronous. A `Pacer` is told about the moments a
//! UI would pause on (the opponent "thinking", a turn handing over, the
//! match ending) and may block for as long as it likes. Pacing never reads
//! or writes match state, so a zero-delay pacer produces the same match as
//! a slow one.

use std::time::Duration;

/// A point in the match flow where a UI may pause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Beat {
    /// Before the opponent picks a card.
    OpponentThinking,
    /// Between turns.
    TurnHandOver,
    /// After the final log line.
    MatchEnd,
}

/// Receives pacing beats from the engine.
pub trait Pacer: Send {
    fn pause(&mut self, beat: Beat);
}

/// No delay. Used by tests and headless hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Instant;

impl Pacer for Instant {
    fn pause(&mut self, _beat: Beat) {}
}

/// Blocks the calling thread for a fixed duration per beat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sleep {
    pub opponent_thinking: Duration,
    pub turn_hand_over: Duration,
    pub match_end: Duration,
}

impl Default for Sleep {
    fn default() -> Self {
        Self {
            opponent_thinking: Duration::from_millis(1500),
            turn_hand_over: Duration::from_millis(300),
            match_end: Duration::from_millis(500),
        }
    }
}

impl Sleep {
    /// Duration of a single beat.
    #[must_use]
    pub fn duration(&self, beat: Beat) -> Duration {
        match beat {
            Beat::OpponentThinking => self.opponent_thinking,
            Beat::TurnHandOver => self.turn_hand_over,
            Beat::MatchEnd => self.match_end,
        }
    }
}

impl Pacer for Sleep {
    fn pause(&mut self, beat: Beat) {
        std::thread::sleep(self.duration(beat));
    }
}
