//! Card effect resolution.
//!
//! `EffectResolver` turns a card play into state changes:
//! 1. Pay the card's mana and remove it from hand
//! 2. Attack damages the opposing side
//! 3. Defense heals the acting side
//! 4. The special effect damages the opposing side or heals the acting
//!    side, with its magnitude scaled by `special_scale`
//! 5. Append the log line
//!
//! Turn hand-over and win detection belong to the engine.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{Card, CardId, EffectKind};
use crate::core::{MatchState, Side};

use super::effect::{AppliedEffect, Effect, EffectSource, Resolution};

/// Resolves card plays against a match.
pub struct EffectResolver;

impl EffectResolver {
    /// Scale a special-effect magnitude, rounding half up.
    #[must_use]
    pub fn scaled_magnitude(magnitude: u32, scale: f64) -> u32 {
        (f64::from(magnitude) * scale).round().max(0.0) as u32
    }

    /// The effects a card produces when `side` plays it, in resolution order.
    ///
    /// Zero amounts produce no effect and no log clause.
    #[must_use]
    pub fn card_effects(
        card: &Card,
        side: Side,
        special_scale: f64,
    ) -> SmallVec<[(EffectSource, Effect); 3]> {
        let target = side.opposite();
        let mut effects = SmallVec::new();

        if let Some(attack) = card.attack.filter(|&a| a > 0) {
            effects.push((EffectSource::Attack, Effect::damage(target, attack)));
        }

        if let Some(defense) = card.defense.filter(|&d| d > 0) {
            effects.push((EffectSource::Defense, Effect::heal(side, defense)));
        }

        let special = card
            .special_effect
            .map(|effect| (effect.kind, Self::scaled_magnitude(effect.magnitude, special_scale)))
            .filter(|&(_, amount)| amount > 0);
        if let Some((kind, amount)) = special {
            let effect = match kind {
                EffectKind::Damage => Effect::damage(target, amount),
                EffectKind::Heal => Effect::heal(side, amount),
            };
            effects.push((EffectSource::Special, effect));
        }

        effects
    }

    /// Apply one effect. Returns the health actually changed.
    pub fn apply(state: &mut MatchState, effect: Effect) -> u32 {
        match effect {
            Effect::Damage { target, amount } => state.damage(target, amount),
            Effect::Heal { target, amount } => state.heal(target, amount),
        }
    }

    /// Resolve a card play.
    ///
    /// The caller has already checked turn ownership and mana. Returns
    /// `None` when the card is not in `side`'s hand; nothing is mutated then.
    pub fn resolve_play(
        state: &mut MatchState,
        side: Side,
        card_id: &CardId,
        special_scale: f64,
    ) -> Option<Resolution> {
        let card = state.take_card(side, card_id)?;

        let effects = Self::card_effects(&card, side, special_scale)
            .into_iter()
            .map(|(source, effect)| AppliedEffect {
                source,
                effect,
                applied: Self::apply(state, effect),
            })
            .collect();

        let resolution = Resolution {
            side,
            card_id: card.id,
            card_name: card.name,
            mana_spent: card.mana,
            effects,
        };

        debug!(
            side = %side,
            card = %resolution.card_id,
            damage = resolution.damage_dealt(),
            healed = resolution.health_gained(),
            "card resolved"
        );

        state.log(resolution.log_line());
        Some(resolution)
    }
}
