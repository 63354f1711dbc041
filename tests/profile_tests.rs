//! Profile, settlement, and redemption tests.
//!
//! These tests drive full matches into settlement and check that every
//! checkpoint lands in the JSON profile store.

use chrono::{DateTime, Duration, TimeZone, Utc};

use mondo_battle::cards::{Card, CardCatalog, CardId, CardType, Rarity};
use mondo_battle::core::{BattleConfig, BattleRng, MatchOutcome, Side};
use mondo_battle::opponent::{Difficulty, OpponentPools};
use mondo_battle::profile::{
    JsonFileStore, MemoryStore, PlayerProfile, ProfileStore, RedeemError, RedemptionRules,
    Rewards,
};
use mondo_battle::rules::BattleEngine;
use tempfile::tempdir;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap()
}

/// A match the player wins on the first play.
fn won_match(difficulty: Difficulty) -> MatchOutcome {
    let mut engine = BattleEngine::new(BattleConfig::default());
    engine.start_match(
        vec![Card::new("ko", "Knockout", Rarity::Epic, CardType::Attack, 5).with_attack(25)],
        &OpponentPools::uniform(vec![
            Card::new("o", "Jab", Rarity::Common, CardType::Attack, 1).with_attack(1)
        ]),
        difficulty,
    );
    engine.play_card(Side::Player, &CardId::new("ko")).unwrap();
    engine.state().outcome().unwrap()
}

/// Settling a win pays the tier's shards and persists them.
#[test]
fn test_match_settlement_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let starter = CardCatalog::standard().starter_hand();

    let mut rewards =
        Rewards::open(JsonFileStore::new(&path), RedemptionRules::default(), starter).unwrap();
    let outcome = won_match(Difficulty::Legend);
    assert_eq!(outcome, MatchOutcome::Winner(Side::Player));

    let awarded = rewards.record_outcome(outcome, Difficulty::Legend).unwrap();
    assert_eq!(awarded, 5);

    let stored = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(stored.shards, 5);
    assert_eq!(stored.wins, 1);
    assert_eq!(stored.highest_tier_won, Some(Difficulty::Legend));
    assert_eq!(stored.collection.len(), 3);
}

/// A missing file opens a fresh profile without writing anything.
#[test]
fn test_open_without_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let rewards = Rewards::open(
        JsonFileStore::new(&path),
        RedemptionRules::default(),
        Vec::new(),
    )
    .unwrap();

    assert_eq!(rewards.profile(), &PlayerProfile::new(Vec::new()));
    assert!(!path.exists());
}

/// Shards earned across sessions can be redeemed after reopening.
#[test]
fn test_redeem_across_sessions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let rules = RedemptionRules::default();

    {
        let mut rewards = Rewards::open(JsonFileStore::new(&path), rules, Vec::new()).unwrap();
        for _ in 0..2 {
            rewards
                .record_outcome(MatchOutcome::Winner(Side::Player), Difficulty::Legend)
                .unwrap();
        }
    }

    let mut rewards = Rewards::open(JsonFileStore::new(&path), rules, Vec::new()).unwrap();
    assert_eq!(rewards.profile().shards, 10);

    let card = rewards
        .redeem(at(1, 9), &CardCatalog::standard(), &mut BattleRng::new(7))
        .unwrap();

    let stored = JsonFileStore::new(&path).load().unwrap().unwrap();
    assert_eq!(stored.shards, 0);
    assert_eq!(stored.collection, vec![card]);
    assert_eq!(stored.last_redemption, Some(at(1, 9)));
}

/// Gates are checked in order: balance, cooldown, daily cap.
#[test]
fn test_gate_order() {
    let mut profile = PlayerProfile::new(Vec::new());
    profile.shards = 5;
    profile.last_redemption = Some(at(3, 10));
    profile.daily_trials_remaining = 0;
    profile.trials_day = Some(at(3, 10).date_naive());

    let rules = RedemptionRules::default();
    let mut rewards =
        Rewards::open(MemoryStore::with_profile(profile.clone()), rules, Vec::new()).unwrap();

    // All three gates closed: balance reported first
    assert!(matches!(
        rewards.check_redeem(at(3, 12)),
        Err(RedeemError::NotEnoughShards { .. })
    ));

    profile.shards = 50;
    rewards = Rewards::open(MemoryStore::with_profile(profile.clone()), rules, Vec::new()).unwrap();
    assert!(matches!(
        rewards.check_redeem(at(3, 12)),
        Err(RedeemError::CooldownActive { .. })
    ));

    let rules = rules.with_cooldown_secs(0);
    rewards = Rewards::open(MemoryStore::with_profile(profile), rules, Vec::new()).unwrap();
    assert!(matches!(
        rewards.check_redeem(at(3, 12)),
        Err(RedeemError::DailyLimitReached { max: 3 })
    ));

    // A new UTC day reopens the cap
    assert!(rewards.check_redeem(at(4, 0)).is_ok());
}

/// Cooldown counts from the last redemption, to the second.
#[test]
fn test_cooldown_boundary() {
    let mut profile = PlayerProfile::new(Vec::new());
    profile.shards = 40;
    profile.last_redemption = Some(at(10, 8));
    let rewards = Rewards::open(
        MemoryStore::with_profile(profile),
        RedemptionRules::default(),
        Vec::new(),
    )
    .unwrap();

    let almost = at(11, 8) - Duration::seconds(1);
    match rewards.check_redeem(almost) {
        Err(RedeemError::CooldownActive { remaining }) => {
            assert_eq!(remaining, Duration::seconds(1));
        }
        other => panic!("expected cooldown, got {other:?}"),
    }
    assert!(rewards.check_redeem(at(11, 8)).is_ok());
}

/// Beating a tier favors its reward rarity in redemption draws.
#[test]
fn test_tier_favors_reward_rarity() {
    let mut catalog = CardCatalog::new();
    catalog.register(Card::new("c", "Common", Rarity::Common, CardType::Attack, 1));
    catalog.register(Card::new("e", "Epic", Rarity::Epic, CardType::Attack, 1));

    let count_epic = |highest: Option<Difficulty>| {
        let mut profile = PlayerProfile::new(Vec::new());
        profile.shards = 10_000;
        profile.highest_tier_won = highest;
        let rules = RedemptionRules::default()
            .with_cooldown_secs(0)
            .with_max_daily_trials(1_000);
        let mut rewards =
            Rewards::open(MemoryStore::with_profile(profile), rules, Vec::new()).unwrap();
        let mut rng = BattleRng::new(11);

        (0..500)
            .filter(|_| {
                let card = rewards.redeem(at(20, 0), &catalog, &mut rng).unwrap();
                card.rarity == Rarity::Epic
            })
            .count()
    };

    let plain = count_epic(None);
    let favored = count_epic(Some(Difficulty::Legend));

    assert!(favored > plain, "favored {favored} vs plain {plain}");
}

/// Win rate gates which tier unlocks next.
#[test]
fn test_unlocks_from_record() {
    let mut profile = PlayerProfile::new(Vec::new());
    assert_eq!(Difficulty::unlocked_by(profile.win_rate()), None);

    profile.wins = 1;
    profile.losses = 1;
    assert_eq!(Difficulty::unlocked_by(profile.win_rate()), Some(Difficulty::Novice));

    profile.wins = 9;
    profile.losses = 1;
    assert_eq!(Difficulty::unlocked_by(profile.win_rate()), Some(Difficulty::Legend));
}

/// A saved profile lives only as long as its scratch directory.
#[test]
fn test_saved_profile_removed_with_dir() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_path_buf();
    let path = root.join("saves").join("profile.json");

    let mut rewards = Rewards::open(
        JsonFileStore::new(&path),
        RedemptionRules::default(),
        Vec::new(),
    )
    .unwrap();
    rewards.record_outcome(MatchOutcome::Draw, Difficulty::Novice).unwrap();
    assert!(path.exists());

    dir.close().unwrap();
    assert!(!root.exists());
}
