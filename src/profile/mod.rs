//! Player profile, rewards, and the persistence port.
//!
//! - `PlayerProfile`: Shards, redemption bookkeeping, collection, record
//! - `Rewards`: Match settlement and shard redemption over a store
//! - `ProfileStore`: Load/save port, with memory and JSON file backends

pub mod rewards;
pub mod store;

pub use rewards::{rarity_weight, PlayerProfile, RedeemError, RedemptionRules, Rewards};
pub use store::{JsonFileStore, MemoryStore, ProfileStore, StoreError};
