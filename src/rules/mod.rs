//! Battle rules: the engine and its turn machinery.
//!
//! - `BattleEngine`: Public operations (start, play, pass, boost, snapshot)
//! - `turn`: Turn hand-over, mana regeneration, boost countdown
//! - `fatigue`: Empty-hand damage, skips, win/loss/draw detection
//! - `Pacer`: Presentation delays injected from outside
//!
//! Only the engine mutates a `MatchState`. Turn transitions are plain
//! function calls in a loop; nothing here waits on a timer.

pub mod engine;
mod fatigue;
pub mod pacing;
pub mod snapshot;
mod turn;

pub use engine::{BattleEngine, PlayOutcome, PlayResponse};
pub use pacing::{Beat, Instant, Pacer, Sleep};
pub use snapshot::MatchSnapshot;
