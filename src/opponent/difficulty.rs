//! Difficulty tiers.
//!
//! A tier picks the opponent's card-selection heuristic and how much of
//! an opponent card's special effect actually lands. It also carries the
//! reward terms of the tier: the win rate a player is expected to reach,
//! the shards a win pays out, and the rarity of the reward card.

use serde::{Deserialize, Serialize};

use crate::cards::Rarity;

/// Opponent difficulty tier, ordered from easiest to hardest.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Novice,
    Veteran,
    Legend,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Novice, Difficulty::Veteran, Difficulty::Legend];

    /// Fraction of an opponent special effect's magnitude that is applied.
    #[must_use]
    pub const fn special_scale(self) -> f64 {
        match self {
            Difficulty::Novice => 0.1,
            Difficulty::Veteran => 0.2,
            Difficulty::Legend => 0.5,
        }
    }

    /// Shards awarded for beating this tier.
    #[must_use]
    pub const fn shard_reward(self) -> u32 {
        match self {
            Difficulty::Novice => 1,
            Difficulty::Veteran => 3,
            Difficulty::Legend => 5,
        }
    }

    /// Win rate a player needs to be considered a match for this tier.
    #[must_use]
    pub const fn required_win_rate(self) -> f64 {
        match self {
            Difficulty::Novice => 0.5,
            Difficulty::Veteran => 0.65,
            Difficulty::Legend => 0.8,
        }
    }

    /// Rarity of the card this tier's rewards lean toward.
    #[must_use]
    pub const fn reward_rarity(self) -> Rarity {
        match self {
            Difficulty::Novice => Rarity::Common,
            Difficulty::Veteran => Rarity::Rare,
            Difficulty::Legend => Rarity::Epic,
        }
    }

    /// Highest card rarity an opponent of this tier fields.
    #[must_use]
    pub const fn max_pool_rarity(self) -> Rarity {
        match self {
            Difficulty::Novice => Rarity::Rare,
            Difficulty::Veteran => Rarity::Epic,
            Difficulty::Legend => Rarity::Legendary,
        }
    }

    /// The hardest tier whose win-rate requirement `win_rate` meets.
    #[must_use]
    pub fn unlocked_by(win_rate: f64) -> Option<Difficulty> {
        Self::ALL
            .into_iter()
            .rev()
            .find(|tier| win_rate >= tier.required_win_rate())
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Novice => write!(f, "novice"),
            Difficulty::Veteran => write!(f, "veteran"),
            Difficulty::Legend => write!(f, "legend"),
        }
    }
}
