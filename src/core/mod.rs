//! Core engine types: sides, state, events, RNG, configuration, errors.
//!
//! This module holds the building blocks every other module shares.
//! The engine in `rules` is the only writer of `MatchState`.

pub mod config;
pub mod error;
pub mod event;
pub mod rng;
pub mod side;
pub mod state;

pub use config::BattleConfig;
pub use error::{BattleError, ConfigError};
pub use event::{BattleEvent, EventRecord};
pub use rng::{BattleRng, BattleRngState};
pub use side::{Side, SideMap};
pub use state::{Combatant, Limits, MatchOutcome, MatchState, MatchStatus};
