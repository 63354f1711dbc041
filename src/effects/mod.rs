//! Effect system for card plays.
//!
//! - `Effect`: Atomic health change (damage or heal) aimed at one side
//! - `Resolution`: What one card play did, with the applied amounts
//! - `EffectResolver`: Executes a card play on match state
//!
//! A card's attack, defense, and special effect each become one `Effect`,
//! always resolved in that order so a single card can both hit and heal.

mod effect;
mod resolver;

pub use effect::{AppliedEffect, Effect, EffectSource, Resolution};
pub use resolver::EffectResolver;
