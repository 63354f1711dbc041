//! Card system: definitions, catalog, and boosts.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card templates
//! - `Card`: Template values plus an optional boost overlay
//! - `CardCatalog`: Template lookup and starter hands
//! - `BoostTerms` / `ActiveBoost`: Staking boost formula and running boost

pub mod boost;
pub mod catalog;
pub mod definition;

pub use boost::{apply_boost, restore, ActiveBoost, BoostTerms};
pub use catalog::CardCatalog;
pub use definition::{BoostOverlay, Card, CardId, CardType, EffectKind, Rarity, SpecialEffect};
