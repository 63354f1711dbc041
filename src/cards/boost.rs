//! Staking boosts: temporary, reversible power increases.
//!
//! Staking tokens buys a percentage increase to every combat value in the
//! player's hand for a number of turn cycles. The percentage follows a
//! diminishing-returns curve and the duration a log2 tier:
//!
//! - `percentage = round(stake * 2 / (1 + log10(stake + 1) * 0.2))`
//! - `turns = 2` for `stake <= 1`, `6` for `stake >= 32`, else `2 + floor(log2(stake))`
//!
//! Boosting stores the pre-boost values in the card's overlay; restoring
//! copies them back verbatim, so repeated cycles never drift.

use serde::{Deserialize, Serialize};

use super::definition::{BoostOverlay, Card, SpecialEffect};

/// Percentage and duration bought by a stake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTerms {
    pub percentage: u32,
    pub turns: u32,
}

impl BoostTerms {
    /// Compute the terms for a stake.
    ///
    /// ```
    /// use mondo_battle::cards::BoostTerms;
    ///
    /// let terms = BoostTerms::from_stake(5);
    /// assert_eq!(terms.percentage, 9);
    /// assert_eq!(terms.turns, 4);
    /// ```
    #[must_use]
    pub fn from_stake(stake: u32) -> Self {
        let stake_f = f64::from(stake);
        let percentage = (stake_f * 2.0 / (1.0 + (stake_f + 1.0).log10() * 0.2)).round() as u32;

        let turns = match stake {
            0..=1 => 2,
            32.. => 6,
            _ => 2 + stake.ilog2(),
        };

        Self { percentage, turns }
    }
}

/// The boost currently running in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBoost {
    pub percentage: u32,
    pub turns_remaining: u32,
}

impl From<BoostTerms> for ActiveBoost {
    fn from(terms: BoostTerms) -> Self {
        Self {
            percentage: terms.percentage,
            turns_remaining: terms.turns,
        }
    }
}

fn scale(value: u32, percentage: u32) -> u32 {
    (f64::from(value) * (100.0 + f64::from(percentage)) / 100.0).round() as u32
}

/// Boost a card's combat values by `percentage`.
///
/// A card that is already boosted is restored first, so the new boost is
/// always computed from template values.
pub fn apply_boost(card: &mut Card, percentage: u32) {
    restore(card);

    card.boost = Some(BoostOverlay {
        original_attack: card.attack,
        original_defense: card.defense,
        original_special: card.special_effect,
    });

    card.attack = card.attack.map(|v| scale(v, percentage));
    card.defense = card.defense.map(|v| scale(v, percentage));
    card.special_effect = card.special_effect.map(|effect| SpecialEffect {
        kind: effect.kind,
        magnitude: scale(effect.magnitude, percentage),
    });
}

/// Restore a boosted card to its pre-boost values. No-op when unboosted.
///
/// Returns true if the card was boosted.
pub fn restore(card: &mut Card) -> bool {
    match card.boost.take() {
        Some(overlay) => {
            card.attack = overlay.original_attack;
            card.defense = overlay.original_defense;
            card.special_effect = overlay.original_special;
            true
        }
        None => false,
    }
}
