//! Property tests for match invariants.
//!
//! Random hands and random player inputs must never break:
//! - health within 0..=max_health and mana within 0..=max_mana
//! - one card leaves the player's hand per accepted play
//! - rejected inputs leave the state untouched
//! - control returns to the player whenever the match is still running
//! - a match ends at most once

use proptest::prelude::*;

use mondo_battle::cards::{
    apply_boost, restore, Card, CardId, CardType, Rarity, SpecialEffect,
};
use mondo_battle::core::{BattleConfig, BattleEvent, MatchState, Side};
use mondo_battle::opponent::{Difficulty, OpponentPools};
use mondo_battle::rules::BattleEngine;

#[derive(Clone, Debug)]
enum Input {
    Play(usize),
    PlayMissing,
    PlayAsOpponent(usize),
    EndTurn,
    Boost(u32),
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        6 => (0usize..16).prop_map(Input::Play),
        1 => Just(Input::PlayMissing),
        1 => (0usize..16).prop_map(Input::PlayAsOpponent),
        2 => Just(Input::EndTurn),
        1 => (0u32..40).prop_map(Input::Boost),
    ]
}

fn arb_special() -> impl Strategy<Value = Option<SpecialEffect>> {
    prop_oneof![
        2 => Just(None),
        1 => (0u32..10).prop_map(|m| Some(SpecialEffect::damage(m))),
        1 => (0u32..10).prop_map(|m| Some(SpecialEffect::heal(m))),
    ]
}

fn arb_hand(prefix: &'static str) -> impl Strategy<Value = Vec<Card>> {
    proptest::collection::vec(
        (
            0u32..12,
            proptest::option::of(0u32..12),
            proptest::option::of(0u32..12),
            arb_special(),
        ),
        0..8,
    )
    .prop_map(move |specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (mana, attack, defense, special))| {
                let mut card = Card::new(
                    format!("{prefix}-{i}"),
                    format!("{prefix} {i}"),
                    Rarity::Common,
                    CardType::Attack,
                    mana,
                );
                card.attack = attack;
                card.defense = defense;
                card.special_effect = special;
                card
            })
            .collect()
    })
}

fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Novice),
        Just(Difficulty::Veteran),
        Just(Difficulty::Legend),
    ]
}

fn assert_bounds(state: &MatchState) -> Result<(), TestCaseError> {
    let limits = state.limits();
    for side in [Side::Player, Side::Opponent] {
        prop_assert!(state.health(side) <= limits.max_health);
        prop_assert!(state.mana(side) <= limits.max_mana);
    }
    Ok(())
}

fn match_ends(state: &MatchState) -> usize {
    state
        .history()
        .iter()
        .filter(|r| matches!(r.event, BattleEvent::MatchEnded(_)))
        .count()
}

proptest! {
    /// Any input sequence keeps every invariant.
    #[test]
    fn prop_random_matches_hold_invariants(
        player_hand in arb_hand("p"),
        opponent_hand in arb_hand("o"),
        difficulty in arb_difficulty(),
        inputs in proptest::collection::vec(arb_input(), 0..40),
        seed in any::<u64>(),
    ) {
        let mut engine = BattleEngine::new(BattleConfig::default().with_seed(seed));
        engine.start_match(player_hand, &OpponentPools::uniform(opponent_hand), difficulty);
        assert_bounds(engine.state())?;

        for input in inputs {
            let before = engine.state().clone();
            let hand_len = before.hand(Side::Player).len();

            let accepted = match input {
                Input::Play(i) => {
                    let id = match before.hand(Side::Player) {
                        [] => CardId::new("none"),
                        hand => hand[i % hand.len()].id.clone(),
                    };
                    let result = engine.play_card(Side::Player, &id);
                    if result.is_ok() {
                        prop_assert_eq!(engine.state().hand(Side::Player).len(), hand_len - 1);
                    }
                    result.is_ok()
                }
                Input::PlayMissing => engine
                    .play_card(Side::Player, &CardId::new("missing"))
                    .is_ok(),
                Input::PlayAsOpponent(i) => {
                    let id = match before.hand(Side::Opponent) {
                        [] => CardId::new("none"),
                        hand => hand[i % hand.len()].id.clone(),
                    };
                    engine.play_card(Side::Opponent, &id).is_ok()
                }
                Input::EndTurn => engine.end_turn_manually().is_ok(),
                Input::Boost(stake) => {
                    let result = engine.activate_boost(stake);
                    if result.is_ok() {
                        prop_assert_eq!(engine.state().hand(Side::Player).len(), hand_len);
                    }
                    result.is_ok()
                }
            };

            if !accepted {
                prop_assert_eq!(engine.state(), &before);
            }
            if !before.is_in_progress() {
                prop_assert!(!accepted);
            }

            let state = engine.state();
            assert_bounds(state)?;
            if state.is_in_progress() {
                prop_assert_eq!(state.current_turn(), Side::Player);
                prop_assert!(state.consecutive_skips() < engine.config().skip_draw_threshold);
            }
            prop_assert!(match_ends(state) <= 1);
            prop_assert_eq!(match_ends(state) == 1, state.outcome().is_some());
        }
    }

    /// The same seed and inputs replay to the same log.
    #[test]
    fn prop_matches_are_deterministic(
        player_hand in arb_hand("p"),
        opponent_hand in arb_hand("o"),
        plays in proptest::collection::vec(0usize..16, 0..20),
        seed in any::<u64>(),
    ) {
        let run = || {
            let mut engine = BattleEngine::new(BattleConfig::default().with_seed(seed));
            engine.start_match(
                player_hand.clone(),
                &OpponentPools::uniform(opponent_hand.clone()),
                Difficulty::Novice,
            );
            for &i in &plays {
                let id = match engine.state().hand(Side::Player) {
                    [] => break,
                    hand => hand[i % hand.len()].id.clone(),
                };
                let _ = engine.play_card(Side::Player, &id);
            }
            engine.state().clone()
        };

        prop_assert_eq!(run(), run());
    }

    /// Boosting then restoring gives back the exact card.
    #[test]
    fn prop_boost_restore_exact(
        attack in proptest::option::of(0u32..1_000),
        defense in proptest::option::of(0u32..1_000),
        special in arb_special(),
        percentages in proptest::collection::vec(0u32..200, 1..6),
    ) {
        let mut template = Card::new("t", "T", Rarity::Rare, CardType::Attack, 2);
        template.attack = attack;
        template.defense = defense;
        template.special_effect = special;

        let mut card = template.clone();
        for pct in percentages {
            apply_boost(&mut card, pct);
            prop_assert!(card.attack_value() >= template.attack_value());
        }
        prop_assert!(restore(&mut card));
        prop_assert_eq!(card, template);
    }
}
