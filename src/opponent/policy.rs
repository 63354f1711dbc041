//! Opponent card-selection policies.
//!
//! Policies are trait-based, one per difficulty tier:
//! - `NovicePolicy`: Uniformly random affordable card
//! - `VeteranPolicy`: Defensive when hurt, aggressive when the player is
//!   low, otherwise the biggest combined stat line
//! - `LegendPolicy`: Mana-efficiency scoring with situational bonuses,
//!   and never misses a lethal play
//!
//! Every policy is a pure function of the `DecisionContext` plus the RNG
//! stream it is handed. `None` means no card in hand is affordable.

use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::BattleRng;

use super::difficulty::Difficulty;

/// Health below which Veteran and Legend opponents play defensively.
pub const LOW_OWN_HEALTH: u32 = 8;

/// Player health below which a Veteran opponent goes for damage.
pub const LOW_PLAYER_HEALTH: u32 = 10;

/// Player mana above which a Legend opponent values tempo.
pub const HIGH_PLAYER_MANA: u32 = 8;

/// Bonus a Legend opponent gives a lethal card.
pub const LETHAL_BONUS: f64 = 100.0;

/// Everything an opponent may look at when choosing a card.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub hand: &'a [Card],
    pub opponent_mana: u32,
    pub opponent_health: u32,
    pub player_health: u32,
    pub player_mana: u32,
}

impl<'a> DecisionContext<'a> {
    /// Indices of hand cards the opponent can pay for, in hand order.
    #[must_use]
    pub fn affordable(&self) -> SmallVec<[usize; 8]> {
        self.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.is_affordable(self.opponent_mana))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Strategy for picking the opponent's next card.
pub trait OpponentPolicy: Send + Sync {
    /// Index into `ctx.hand` of the card to play.
    fn choose(&self, ctx: &DecisionContext<'_>, rng: &mut BattleRng) -> Option<usize>;
}

/// Index of the first candidate with the strictly highest key.
///
/// Ties keep the earlier candidate, unlike `Iterator::max_by_key`.
fn first_max_by<K, F>(candidates: &[usize], mut key: F) -> Option<(usize, K)>
where
    K: PartialOrd + Copy,
    F: FnMut(usize) -> K,
{
    candidates.iter().fold(None, |best, &i| {
        let k = key(i);
        match best {
            Some((_, best_k)) if k <= best_k => best,
            _ => Some((i, k)),
        }
    })
}

fn random_pick(candidates: &[usize], rng: &mut BattleRng) -> Option<usize> {
    rng.choose(candidates).copied()
}

/// Uniformly random choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct NovicePolicy;

impl OpponentPolicy for NovicePolicy {
    fn choose(&self, ctx: &DecisionContext<'_>, rng: &mut BattleRng) -> Option<usize> {
        random_pick(&ctx.affordable(), rng)
    }
}

/// Rule-of-thumb choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct VeteranPolicy;

impl VeteranPolicy {
    /// Highest positive value of one stat, or a random affordable card
    /// when no candidate has any.
    fn prefer(
        candidates: &[usize],
        stat: impl Fn(usize) -> u32,
        rng: &mut BattleRng,
    ) -> Option<usize> {
        match first_max_by(candidates, stat) {
            Some((i, value)) if value > 0 => Some(i),
            _ => random_pick(candidates, rng),
        }
    }
}

impl OpponentPolicy for VeteranPolicy {
    fn choose(&self, ctx: &DecisionContext<'_>, rng: &mut BattleRng) -> Option<usize> {
        let candidates = ctx.affordable();
        if candidates.is_empty() {
            return None;
        }

        let hand = ctx.hand;
        if ctx.opponent_health < LOW_OWN_HEALTH {
            Self::prefer(&candidates, |i| hand[i].defense_value(), rng)
        } else if ctx.player_health < LOW_PLAYER_HEALTH {
            Self::prefer(&candidates, |i| hand[i].attack_value(), rng)
        } else {
            first_max_by(&candidates, |i| {
                hand[i].attack_value() + hand[i].defense_value()
            })
            .map(|(i, _)| i)
        }
    }
}

/// Scoring choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegendPolicy;

impl LegendPolicy {
    /// Does the card's attack alone finish the player?
    #[must_use]
    pub fn is_lethal(card: &Card, player_health: u32) -> bool {
        card.attack.is_some_and(|attack| attack >= player_health)
    }

    /// `(attack * 1.2 + defense + bonus) / mana`, with zero-cost cards
    /// divided by 1.
    #[must_use]
    pub fn score(card: &Card, ctx: &DecisionContext<'_>) -> f64 {
        let attack = f64::from(card.attack_value());
        let defense = f64::from(card.defense_value());

        let bonus = if Self::is_lethal(card, ctx.player_health) {
            LETHAL_BONUS
        } else if ctx.opponent_health < LOW_OWN_HEALTH {
            defense * 2.0
        } else if ctx.player_mana > HIGH_PLAYER_MANA {
            attack * 0.5
        } else {
            0.0
        };

        (attack * 1.2 + defense + bonus) / f64::from(card.mana.max(1))
    }
}

impl OpponentPolicy for LegendPolicy {
    fn choose(&self, ctx: &DecisionContext<'_>, _rng: &mut BattleRng) -> Option<usize> {
        let candidates = ctx.affordable();

        // A cheap heal can outscore an expensive finisher; lethal always wins.
        let lethal: SmallVec<[usize; 8]> = candidates
            .iter()
            .copied()
            .filter(|&i| Self::is_lethal(&ctx.hand[i], ctx.player_health))
            .collect();
        let pool = if lethal.is_empty() { &candidates } else { &lethal };

        first_max_by(pool, |i| Self::score(&ctx.hand[i], ctx)).map(|(i, _)| i)
    }
}

/// The policy a tier plays with.
#[must_use]
pub fn policy_for(difficulty: Difficulty) -> &'static dyn OpponentPolicy {
    match difficulty {
        Difficulty::Novice => &NovicePolicy,
        Difficulty::Veteran => &VeteranPolicy,
        Difficulty::Legend => &LegendPolicy,
    }
}

/// Choose the opponent's card for a tier.
pub fn choose_card(
    difficulty: Difficulty,
    ctx: &DecisionContext<'_>,
    rng: &mut BattleRng,
) -> Option<usize> {
    policy_for(difficulty).choose(ctx, rng)
}
