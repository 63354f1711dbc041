//! # mondo-battle
//!
//! A turn-based card battle engine: one player against a tiered AI
//! opponent, with mana, fatigue, staking boosts, and shard rewards.
//!
//! ## Design Principles
//!
//! 1. **Synchronous core**: Every operation runs the match forward to the
//!    next point where the player must act. Presentation delays are an
//!    injected `Pacer`, never a timer inside the rules.
//!
//! 2. **Single owner**: `BattleEngine` owns the `MatchState` and is its only
//!    writer. Callers read through `&MatchState`.
//!
//! 3. **Deterministic**: All randomness comes from a seeded `BattleRng`.
//!    Same seed and inputs, same battle log.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) `MatchState` cloning via `im-rs`
//!   for previews and snapshots.
//!
//! - **Explicit results**: Rejected plays are `BattleError` values that
//!   leave the match untouched; skips and fatigue are recorded events.
//!
//! ## Modules
//!
//! - `core`: Sides, state, events, RNG, configuration, errors
//! - `cards`: Card definitions, catalog, boosts
//! - `effects`: Effect primitives and the card effect resolver
//! - `opponent`: Difficulty tiers, pools, decision policies
//! - `rules`: The battle engine, turns, fatigue, pacing, snapshots
//! - `profile`: Player profile, shard rewards, persistence port
//!
//! ## Example
//!
//! ```
//! use mondo_battle::{BattleConfig, BattleEngine, CardCatalog, Difficulty, OpponentPools, Side};
//!
//! let catalog = CardCatalog::standard();
//! let pools = OpponentPools::standard(&catalog);
//!
//! let mut engine = BattleEngine::new(BattleConfig::default());
//! engine.start_match(catalog.starter_hand(), &pools, Difficulty::Novice);
//!
//! let bolt = catalog.starter_hand()[0].id.clone();
//! let outcome = engine.play_card(Side::Player, &bolt).unwrap();
//! assert_eq!(outcome.log_entries[0], "You played Lightning Strike. Dealt 5 damage to opponent.");
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod opponent;
pub mod profile;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, BattleError, BattleEvent, BattleRng, BattleRngState, Combatant, ConfigError,
    EventRecord, Limits, MatchOutcome, MatchState, MatchStatus, Side, SideMap,
};

pub use crate::cards::{
    apply_boost, restore, ActiveBoost, BoostOverlay, BoostTerms, Card, CardCatalog, CardId,
    CardType, EffectKind, Rarity, SpecialEffect,
};

pub use crate::effects::{AppliedEffect, Effect, EffectResolver, EffectSource, Resolution};

pub use crate::opponent::{
    choose_card, DecisionContext, Difficulty, LegendPolicy, NovicePolicy, OpponentPolicy,
    OpponentPools, VeteranPolicy,
};

pub use crate::rules::{
    BattleEngine, Beat, Instant, MatchSnapshot, Pacer, PlayOutcome, PlayResponse, Sleep,
};

pub use crate::profile::{
    JsonFileStore, MemoryStore, PlayerProfile, ProfileStore, RedeemError, RedemptionRules,
    Rewards, StoreError,
};
