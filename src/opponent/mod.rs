//! The AI opponent: difficulty tiers, card pools, and decision policies.
//!
//! ## Key Types
//!
//! - `Difficulty`: Novice / Veteran / Legend, with special-effect scaling
//!   and reward terms
//! - `OpponentPools`: Starting hand per tier
//! - `OpponentPolicy`: Card selection, one implementation per tier
//! - `DecisionContext`: The inputs a policy may look at

pub mod difficulty;
pub mod policy;
pub mod pools;

pub use difficulty::Difficulty;
pub use policy::{
    choose_card, policy_for, DecisionContext, LegendPolicy, NovicePolicy, OpponentPolicy,
    VeteranPolicy,
};
pub use pools::OpponentPools;
