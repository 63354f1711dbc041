//! Effect definitions.
//!
//! A played card breaks down into at most three atomic effects, applied
//! in a fixed order: attack (damage to the other side), defense (heal
//! own side), then the special effect (damage or heal).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::Side;

/// An atomic health change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Lower a side's health, floored at 0.
    Damage { target: Side, amount: u32 },
    /// Raise a side's health, capped at the ceiling.
    Heal { target: Side, amount: u32 },
}

impl Effect {
    #[must_use]
    pub const fn damage(target: Side, amount: u32) -> Self {
        Self::Damage { target, amount }
    }

    #[must_use]
    pub const fn heal(target: Side, amount: u32) -> Self {
        Self::Heal { target, amount }
    }

    #[must_use]
    pub const fn target(&self) -> Side {
        match self {
            Effect::Damage { target, .. } | Effect::Heal { target, .. } => *target,
        }
    }

    /// Nominal amount, before floor/ceiling clamping.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        match self {
            Effect::Damage { amount, .. } | Effect::Heal { amount, .. } => *amount,
        }
    }
}

/// Which card value produced an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectSource {
    Attack,
    Defense,
    Special,
}

/// An effect together with the health change it actually caused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub source: EffectSource,
    pub effect: Effect,
    /// Health actually lost or gained after clamping.
    pub applied: u32,
}

/// Everything that happened when one card resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub side: Side,
    pub card_id: CardId,
    pub card_name: String,
    pub mana_spent: u32,

    /// Applied effects in resolution order.
    /// SmallVec: a card never produces more than three.
    pub effects: SmallVec<[AppliedEffect; 3]>,
}

impl Resolution {
    /// Health actually removed from the other side.
    #[must_use]
    pub fn damage_dealt(&self) -> u32 {
        self.effects
            .iter()
            .filter(|e| matches!(e.effect, Effect::Damage { .. }))
            .map(|e| e.applied)
            .sum()
    }

    /// Health actually restored to the acting side.
    #[must_use]
    pub fn health_gained(&self) -> u32 {
        self.effects
            .iter()
            .filter(|e| matches!(e.effect, Effect::Heal { .. }))
            .map(|e| e.applied)
            .sum()
    }

    /// The battle log line for this resolution.
    ///
    /// Names the card and every numeric effect, in resolution order.
    #[must_use]
    pub fn log_line(&self) -> String {
        let mut line = match self.side {
            Side::Player => format!("You played {}.", self.card_name),
            Side::Opponent => format!("Opponent played {}.", self.card_name),
        };

        for applied in &self.effects {
            let amount = applied.effect.amount();
            let clause = match (self.side, applied.source, applied.effect) {
                (Side::Player, EffectSource::Special, Effect::Damage { .. }) => {
                    format!(" Special effect dealt {} damage to opponent.", amount)
                }
                (Side::Opponent, EffectSource::Special, Effect::Damage { .. }) => {
                    format!(" Special effect dealt {} damage to you.", amount)
                }
                (Side::Player, EffectSource::Special, Effect::Heal { .. }) => {
                    format!(" Special effect restored {} health.", amount)
                }
                (Side::Opponent, EffectSource::Special, Effect::Heal { .. }) => {
                    format!(" Opponent's special effect restored {} health.", amount)
                }
                (Side::Player, _, Effect::Damage { .. }) => {
                    format!(" Dealt {} damage to opponent.", amount)
                }
                (Side::Opponent, _, Effect::Damage { .. }) => {
                    format!(" Dealt {} damage to you.", amount)
                }
                (Side::Player, _, Effect::Heal { .. }) => format!(" Gained {} health.", amount),
                (Side::Opponent, _, Effect::Heal { .. }) => {
                    format!(" Opponent gained {} health.", amount)
                }
            };
            line.push_str(&clause);
        }

        line
    }
}
