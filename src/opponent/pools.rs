//! Opponent card pools, one per difficulty tier.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardCatalog};

use super::difficulty::Difficulty;

/// Fewest cards a pool keeps before starter cards are allowed back in.
pub const MIN_POOL_SIZE: usize = 3;

/// The hand each tier's opponent starts a match with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentPools {
    novice: Vec<Card>,
    veteran: Vec<Card>,
    legend: Vec<Card>,
}

impl OpponentPools {
    /// Build pools from explicit hands.
    #[must_use]
    pub fn new(novice: Vec<Card>, veteran: Vec<Card>, legend: Vec<Card>) -> Self {
        Self {
            novice,
            veteran,
            legend,
        }
    }

    /// Every tier fields the same hand.
    #[must_use]
    pub fn uniform(hand: Vec<Card>) -> Self {
        Self::new(hand.clone(), hand.clone(), hand)
    }

    /// Pools drawn from a catalog.
    ///
    /// Each tier takes every template up to its rarity ceiling. The starter
    /// templates are left out as long as at least `MIN_POOL_SIZE` others
    /// remain, so the opponent rarely mirrors the player's hand.
    #[must_use]
    pub fn standard(catalog: &CardCatalog) -> Self {
        let starter: Vec<_> = catalog.starter_hand().into_iter().map(|c| c.id).collect();

        let pool_for = |tier: Difficulty| -> Vec<Card> {
            let eligible: Vec<Card> = catalog
                .find(|c| c.rarity <= tier.max_pool_rarity())
                .cloned()
                .collect();
            let fresh: Vec<Card> = eligible
                .iter()
                .filter(|c| !starter.contains(&c.id))
                .cloned()
                .collect();

            if fresh.len() >= MIN_POOL_SIZE {
                fresh
            } else {
                eligible
            }
        };

        Self::new(
            pool_for(Difficulty::Novice),
            pool_for(Difficulty::Veteran),
            pool_for(Difficulty::Legend),
        )
    }

    #[must_use]
    pub fn pool(&self, difficulty: Difficulty) -> &[Card] {
        match difficulty {
            Difficulty::Novice => &self.novice,
            Difficulty::Veteran => &self.veteran,
            Difficulty::Legend => &self.legend,
        }
    }

    /// A fresh copy of a tier's hand for a new match.
    #[must_use]
    pub fn hand_for(&self, difficulty: Difficulty) -> Vec<Card> {
        self.pool(difficulty).to_vec()
    }
}
