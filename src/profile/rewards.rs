//! Match settlement and shard redemption.
//!
//! ## Settlement
//!
//! Every finished match is recorded on the profile. A win pays the
//! difficulty tier's shard reward.
//!
//! ## Redemption
//!
//! Shards are traded for a random catalog card. Three gates are checked
//! in order:
//! 1. Balance: at least `shards_required` shards
//! 2. Cooldown: `cooldown_secs` since the last redemption
//! 3. Daily cap: `max_daily_trials` per UTC calendar day
//!
//! Both checkpoints save through the `ProfileStore`. A failed save leaves
//! the in-memory profile unchanged.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::cards::{Card, CardCatalog, Rarity};
use crate::core::{BattleRng, MatchOutcome, Side};
use crate::opponent::Difficulty;

use super::store::{ProfileStore, StoreError};

/// Gate values for shard redemption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedemptionRules {
    pub shards_required: u32,
    pub cooldown_secs: i64,
    pub max_daily_trials: u32,
}

impl Default for RedemptionRules {
    fn default() -> Self {
        Self {
            shards_required: 10,
            cooldown_secs: 24 * 60 * 60,
            max_daily_trials: 3,
        }
    }
}

impl RedemptionRules {
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::seconds(self.cooldown_secs)
    }

    #[must_use]
    pub fn with_cooldown_secs(mut self, secs: i64) -> Self {
        self.cooldown_secs = secs;
        self
    }

    #[must_use]
    pub fn with_max_daily_trials(mut self, trials: u32) -> Self {
        self.max_daily_trials = trials;
        self
    }
}

/// Base draw weight of a rarity in redemption.
#[must_use]
pub fn rarity_weight(rarity: Rarity) -> f32 {
    match rarity {
        Rarity::Common => 50.0,
        Rarity::Rare => 30.0,
        Rarity::Epic => 15.0,
        Rarity::Legendary => 5.0,
    }
}

/// Weight multiplier for cards of the reward rarity of the hardest tier
/// the player has beaten.
pub const TIER_RARITY_BONUS: f32 = 3.0;

/// Persistent player data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub shards: u32,
    pub last_redemption: Option<DateTime<Utc>>,
    pub daily_trials_remaining: u32,

    /// UTC day `daily_trials_remaining` was counted for.
    pub trials_day: Option<NaiveDate>,

    pub collection: Vec<Card>,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub highest_tier_won: Option<Difficulty>,
}

impl PlayerProfile {
    /// A fresh profile owning `collection`.
    #[must_use]
    pub fn new(collection: Vec<Card>) -> Self {
        Self {
            shards: 0,
            last_redemption: None,
            daily_trials_remaining: RedemptionRules::default().max_daily_trials,
            trials_day: None,
            collection,
            wins: 0,
            losses: 0,
            draws: 0,
            highest_tier_won: None,
        }
    }

    /// Wins over decided matches; draws don't count.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(decided)
        }
    }

    /// Trials left on the UTC day of `now`.
    #[must_use]
    pub fn trials_left(&self, now: DateTime<Utc>, rules: &RedemptionRules) -> u32 {
        if self.trials_day == Some(now.date_naive()) {
            self.daily_trials_remaining
        } else {
            rules.max_daily_trials
        }
    }
}

/// A redemption that was refused.
#[derive(Debug, Error)]
pub enum RedeemError {
    #[error("not enough shards: need {required}, have {balance}")]
    NotEnoughShards { required: u32, balance: u32 },

    #[error(
        "cooldown active: try again in {}h {}m",
        .remaining.num_hours(),
        .remaining.num_minutes() % 60
    )]
    CooldownActive { remaining: Duration },

    #[error("daily limit reached: at most {max} redemptions per day")]
    DailyLimitReached { max: u32 },

    #[error("no cards available to redeem")]
    EmptyCatalog,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Profile bookkeeping over a persistence port.
pub struct Rewards<S: ProfileStore> {
    store: S,
    profile: PlayerProfile,
    rules: RedemptionRules,
}

impl<S: ProfileStore> Rewards<S> {
    /// Load the stored profile, or start a new one with `starter`.
    pub fn open(store: S, rules: RedemptionRules, starter: Vec<Card>) -> Result<Self, StoreError> {
        let profile = store.load()?.unwrap_or_else(|| PlayerProfile {
            daily_trials_remaining: rules.max_daily_trials,
            ..PlayerProfile::new(starter)
        });
        Ok(Self {
            store,
            profile,
            rules,
        })
    }

    #[must_use]
    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    #[must_use]
    pub fn rules(&self) -> &RedemptionRules {
        &self.rules
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Settle a finished match. Returns the shards awarded.
    pub fn record_outcome(
        &mut self,
        outcome: MatchOutcome,
        difficulty: Difficulty,
    ) -> Result<u32, StoreError> {
        let mut next = self.profile.clone();
        let awarded = match outcome {
            MatchOutcome::Winner(Side::Player) => {
                next.wins += 1;
                next.highest_tier_won = next.highest_tier_won.max(Some(difficulty));
                difficulty.shard_reward()
            }
            MatchOutcome::Winner(Side::Opponent) => {
                next.losses += 1;
                0
            }
            MatchOutcome::Draw => {
                next.draws += 1;
                0
            }
        };
        next.shards += awarded;

        self.commit(next)?;
        info!(
            outcome = ?outcome,
            difficulty = %difficulty,
            awarded,
            shards = self.profile.shards,
            "match settled"
        );
        Ok(awarded)
    }

    /// Check the three redemption gates without changing anything.
    pub fn check_redeem(&self, now: DateTime<Utc>) -> Result<(), RedeemError> {
        let profile = &self.profile;

        if profile.shards < self.rules.shards_required {
            return Err(RedeemError::NotEnoughShards {
                required: self.rules.shards_required,
                balance: profile.shards,
            });
        }

        if let Some(last) = profile.last_redemption {
            let elapsed = now.signed_duration_since(last);
            if elapsed < self.rules.cooldown() {
                return Err(RedeemError::CooldownActive {
                    remaining: self.rules.cooldown() - elapsed,
                });
            }
        }

        if profile.trials_left(now, &self.rules) == 0 {
            return Err(RedeemError::DailyLimitReached {
                max: self.rules.max_daily_trials,
            });
        }

        Ok(())
    }

    /// Trade shards for a random card from `catalog`.
    pub fn redeem(
        &mut self,
        now: DateTime<Utc>,
        catalog: &CardCatalog,
        rng: &mut BattleRng,
    ) -> Result<Card, RedeemError> {
        if let Err(err) = self.check_redeem(now) {
            warn!(error = %err, shards = self.profile.shards, "redemption refused");
            return Err(err);
        }

        let card = self.draw_card(catalog, rng).ok_or(RedeemError::EmptyCatalog)?;

        let mut next = self.profile.clone();
        next.daily_trials_remaining = next.trials_left(now, &self.rules).saturating_sub(1);
        next.trials_day = Some(now.date_naive());
        next.shards -= self.rules.shards_required;
        next.last_redemption = Some(now);
        next.collection.push(card.clone());

        self.commit(next)?;
        info!(
            card = %card.id,
            rarity = ?card.rarity,
            shards = self.profile.shards,
            trials_left = self.profile.daily_trials_remaining,
            "shards redeemed"
        );
        Ok(card)
    }

    fn draw_card(&self, catalog: &CardCatalog, rng: &mut BattleRng) -> Option<Card> {
        let favored = self.profile.highest_tier_won.map(Difficulty::reward_rarity);
        let cards: Vec<&Card> = catalog.iter().collect();
        let weights: Vec<f32> = cards
            .iter()
            .map(|card| {
                let weight = rarity_weight(card.rarity);
                if Some(card.rarity) == favored {
                    weight * TIER_RARITY_BONUS
                } else {
                    weight
                }
            })
            .collect();

        rng.choose_weighted(&weights).map(|i| cards[i].clone())
    }

    fn commit(&mut self, next: PlayerProfile) -> Result<(), StoreError> {
        self.store.save(&next)?;
        self.profile = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::MemoryStore;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn rewards_with(shards: u32, rules: RedemptionRules) -> Rewards<MemoryStore> {
        let mut profile = PlayerProfile::new(Vec::new());
        profile.shards = shards;
        Rewards::open(MemoryStore::with_profile(profile), rules, Vec::new()).unwrap()
    }

    #[test]
    fn test_open_new_profile() {
        let starter = CardCatalog::standard().starter_hand();
        let rewards = Rewards::open(MemoryStore::new(), RedemptionRules::default(), starter).unwrap();

        assert_eq!(rewards.profile().collection.len(), 3);
        assert_eq!(rewards.profile().shards, 0);
        assert_eq!(rewards.store().saves(), 0);
    }

    #[test]
    fn test_open_new_profile_uses_rules() {
        let rules = RedemptionRules::default().with_max_daily_trials(5);
        let mut rewards = Rewards::open(MemoryStore::new(), rules, Vec::new()).unwrap();
        assert_eq!(rewards.profile().daily_trials_remaining, 5);

        rewards.record_outcome(MatchOutcome::Draw, Difficulty::Novice).unwrap();
        assert_eq!(rewards.store().stored().unwrap().daily_trials_remaining, 5);
    }

    #[test]
    fn test_record_win_awards_tier_shards() {
        let mut rewards = rewards_with(0, RedemptionRules::default());

        let awarded = rewards
            .record_outcome(MatchOutcome::Winner(Side::Player), Difficulty::Veteran)
            .unwrap();

        assert_eq!(awarded, 3);
        assert_eq!(rewards.profile().shards, 3);
        assert_eq!(rewards.profile().wins, 1);
        assert_eq!(rewards.profile().highest_tier_won, Some(Difficulty::Veteran));
        assert_eq!(rewards.store().saves(), 1);
    }

    #[test]
    fn test_record_loss_and_draw() {
        let mut rewards = rewards_with(0, RedemptionRules::default());

        rewards
            .record_outcome(MatchOutcome::Winner(Side::Opponent), Difficulty::Legend)
            .unwrap();
        rewards.record_outcome(MatchOutcome::Draw, Difficulty::Legend).unwrap();

        let profile = rewards.profile();
        assert_eq!((profile.wins, profile.losses, profile.draws), (0, 1, 1));
        assert_eq!(profile.shards, 0);
        assert_eq!(profile.highest_tier_won, None);
    }

    #[test]
    fn test_highest_tier_keeps_max() {
        let mut rewards = rewards_with(0, RedemptionRules::default());
        let win = MatchOutcome::Winner(Side::Player);

        rewards.record_outcome(win, Difficulty::Legend).unwrap();
        rewards.record_outcome(win, Difficulty::Novice).unwrap();

        assert_eq!(rewards.profile().highest_tier_won, Some(Difficulty::Legend));
        assert_eq!(rewards.profile().shards, 6);
    }

    #[test]
    fn test_win_rate() {
        let mut profile = PlayerProfile::new(Vec::new());
        assert_eq!(profile.win_rate(), 0.0);

        profile.wins = 3;
        profile.losses = 1;
        profile.draws = 5;
        assert!((profile.win_rate() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_redeem_needs_shards() {
        let mut rewards = rewards_with(9, RedemptionRules::default());
        let err = rewards
            .redeem(at(1, 12), &CardCatalog::standard(), &mut BattleRng::new(1))
            .unwrap_err();

        assert!(matches!(
            err,
            RedeemError::NotEnoughShards { required: 10, balance: 9 }
        ));
        assert_eq!(rewards.store().saves(), 0);
    }

    #[test]
    fn test_redeem_success() {
        let mut rewards = rewards_with(12, RedemptionRules::default());
        let now = at(1, 12);

        let card = rewards
            .redeem(now, &CardCatalog::standard(), &mut BattleRng::new(1))
            .unwrap();

        let profile = rewards.profile();
        assert_eq!(profile.shards, 2);
        assert_eq!(profile.last_redemption, Some(now));
        assert_eq!(profile.daily_trials_remaining, 2);
        assert_eq!(profile.collection, vec![card]);
        assert_eq!(rewards.store().stored(), Some(profile));
    }

    #[test]
    fn test_cooldown_gate() {
        let mut rewards = rewards_with(30, RedemptionRules::default());
        let catalog = CardCatalog::standard();
        let mut rng = BattleRng::new(1);

        rewards.redeem(at(1, 12), &catalog, &mut rng).unwrap();

        let err = rewards.redeem(at(2, 2), &catalog, &mut rng).unwrap_err();
        match &err {
            RedeemError::CooldownActive { remaining } => {
                assert_eq!(*remaining, Duration::hours(10));
                assert_eq!(err.to_string(), "cooldown active: try again in 10h 0m");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(rewards.redeem(at(2, 12), &catalog, &mut rng).is_ok());
    }

    #[test]
    fn test_daily_cap_resets_next_day() {
        let rules = RedemptionRules::default()
            .with_cooldown_secs(0)
            .with_max_daily_trials(2);
        let mut rewards = rewards_with(100, rules);
        let catalog = CardCatalog::standard();
        let mut rng = BattleRng::new(3);

        rewards.redeem(at(5, 8), &catalog, &mut rng).unwrap();
        rewards.redeem(at(5, 9), &catalog, &mut rng).unwrap();

        let err = rewards.redeem(at(5, 10), &catalog, &mut rng).unwrap_err();
        assert!(matches!(err, RedeemError::DailyLimitReached { max: 2 }));

        rewards.redeem(at(6, 0), &catalog, &mut rng).unwrap();
        assert_eq!(rewards.profile().daily_trials_remaining, 1);
        assert_eq!(rewards.profile().collection.len(), 3);
    }

    #[test]
    fn test_empty_catalog() {
        let mut rewards = rewards_with(10, RedemptionRules::default());
        let err = rewards
            .redeem(at(1, 0), &CardCatalog::new(), &mut BattleRng::new(0))
            .unwrap_err();

        assert!(matches!(err, RedeemError::EmptyCatalog));
        assert_eq!(rewards.profile().shards, 10);
    }
}
