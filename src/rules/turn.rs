//! Turn controller.
//!
//! Entering a side's turn bumps the turn number, hands that side its
//! per-turn mana, and (on the player's turn, once per full cycle) ticks the
//! running boost down. When the boost reaches zero, every boosted card in
//! the player's hand gets its template values back.

use tracing::{debug, info};

use crate::cards::restore;
use crate::core::{BattleEvent, MatchState, Side};

/// What happened at the start of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TurnStep {
    /// The player holds a playable card and must act.
    AwaitInput,
    /// The side is done; the other side goes next.
    Passed,
    /// The match is over.
    Ended,
}

/// Hand the turn to `side`.
pub(crate) fn enter_turn(state: &mut MatchState, side: Side, mana_per_turn: u32) {
    state.current_turn = side;
    state.turn_number += 1;
    state.regain_mana(side, mana_per_turn);

    if side == Side::Player {
        tick_boost(state);
    }

    debug!(
        side = %side,
        turn = state.turn_number,
        mana = state.mana(side),
        "turn started"
    );
}

/// Count the running boost down one cycle. Returns true if it expired.
pub(crate) fn tick_boost(state: &mut MatchState) -> bool {
    let Some(boost) = state.active_boost.as_mut() else {
        return false;
    };

    boost.turns_remaining = boost.turns_remaining.saturating_sub(1);
    if boost.turns_remaining > 0 {
        return false;
    }

    state.active_boost = None;
    let restored = state
        .hand_mut(Side::Player)
        .iter_mut()
        .map(restore)
        .filter(|&was_boosted| was_boosted)
        .count();

    state.log("Your boost has worn off. Cards return to normal power.");
    state.record(Side::Player, BattleEvent::BoostExpired);
    info!(restored, "boost expired");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{apply_boost, ActiveBoost, Card, CardType, Rarity};
    use crate::core::BattleConfig;
    use crate::opponent::Difficulty;

    fn state() -> MatchState {
        let hand = vec![Card::new("a", "A", Rarity::Common, CardType::Attack, 3).with_attack(10)];
        MatchState::new(&BattleConfig::default(), hand, vec![], Difficulty::Novice)
    }

    #[test]
    fn test_enter_turn_regains_mana() {
        let mut state = state();
        state.take_card(Side::Player, &"a".into());
        assert_eq!(state.mana(Side::Player), 7);

        enter_turn(&mut state, Side::Opponent, 1);
        assert_eq!(state.current_turn(), Side::Opponent);
        assert_eq!(state.turn_number(), 2);
        assert_eq!(state.mana(Side::Opponent), 10);

        enter_turn(&mut state, Side::Player, 1);
        assert_eq!(state.mana(Side::Player), 8);
        assert_eq!(state.turn_number(), 3);
    }

    #[test]
    fn test_boost_ticks_on_player_turn_only() {
        let mut state = state();
        state.active_boost = Some(ActiveBoost {
            percentage: 50,
            turns_remaining: 2,
        });

        enter_turn(&mut state, Side::Opponent, 1);
        assert_eq!(state.active_boost().unwrap().turns_remaining, 2);

        enter_turn(&mut state, Side::Player, 1);
        assert_eq!(state.active_boost().unwrap().turns_remaining, 1);
    }

    #[test]
    fn test_boost_expiry_restores_hand() {
        let mut state = state();
        apply_boost(&mut state.hand_mut(Side::Player)[0], 50);
        state.active_boost = Some(ActiveBoost {
            percentage: 50,
            turns_remaining: 1,
        });
        assert_eq!(state.hand(Side::Player)[0].attack, Some(15));

        assert!(tick_boost(&mut state));

        assert_eq!(state.active_boost(), None);
        assert_eq!(state.hand(Side::Player)[0].attack, Some(10));
        assert!(!state.hand(Side::Player)[0].is_boosted());
        assert_eq!(
            state.history().back().unwrap().event,
            BattleEvent::BoostExpired
        );
    }

    #[test]
    fn test_tick_without_boost() {
        let mut state = state();
        assert!(!tick_boost(&mut state));
        assert!(state.battle_log().is_empty());
    }
}
