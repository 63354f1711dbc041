//! Fatigue and termination.
//!
//! A side that must act with an empty hand takes fatigue damage equal to
//! the match-wide fatigue counter, which then grows by one. A side holding
//! only unaffordable cards passes instead. Both count as a skip.
//!
//! After every skip the checks run in order:
//! 1. The skipping side is at 0 health: the other side wins
//! 2. `consecutive_skips >= threshold`: draw
//! 3. Otherwise the turn passes

use tracing::{debug, info};

use crate::core::{BattleEvent, MatchOutcome, MatchState, Side};

use super::turn::TurnStep;

/// Damage an empty-handed side, then run the termination checks.
pub(crate) fn apply_fatigue(state: &mut MatchState, side: Side, skip_threshold: u32) -> TurnStep {
    let damage = state.fatigue_counter;
    state.damage(side, damage);

    state.log(match side {
        Side::Player => format!("You have no cards left! Fatigue deals {} damage to you.", damage),
        Side::Opponent => format!(
            "Opponent has no cards left! Fatigue deals {} damage to opponent.",
            damage
        ),
    });
    state.record(side, BattleEvent::Fatigue { damage });

    state.fatigue_counter += 1;
    state.consecutive_skips += 1;

    debug!(
        side = %side,
        damage,
        health = state.health(side),
        next_fatigue = state.fatigue_counter,
        skips = state.consecutive_skips,
        "fatigue"
    );

    check_after_skip(state, side, skip_threshold)
}

/// Pass a turn for a side holding only unaffordable cards.
pub(crate) fn pass_unplayable(state: &mut MatchState, side: Side, skip_threshold: u32) -> TurnStep {
    state.log(match side {
        Side::Player => "You have no playable cards. Opponent's turn.",
        Side::Opponent => "Opponent has no playable cards. Your turn.",
    });
    state.record(side, BattleEvent::NoPlayableCard);
    state.consecutive_skips += 1;

    debug!(side = %side, skips = state.consecutive_skips, "no playable card");

    check_after_skip(state, side, skip_threshold)
}

fn check_after_skip(state: &mut MatchState, side: Side, skip_threshold: u32) -> TurnStep {
    if state.health(side) == 0 {
        end_match(state, MatchOutcome::Winner(side.opposite()));
        TurnStep::Ended
    } else if state.consecutive_skips >= skip_threshold {
        end_match(state, MatchOutcome::Draw);
        TurnStep::Ended
    } else {
        TurnStep::Passed
    }
}

/// End the match with a closing log line.
pub(crate) fn end_match(state: &mut MatchState, outcome: MatchOutcome) {
    if !state.is_in_progress() {
        return;
    }

    state.log(match outcome {
        MatchOutcome::Winner(Side::Player) => "Victory! You've won the battle.",
        MatchOutcome::Winner(Side::Opponent) => "Defeat! Better luck next time.",
        MatchOutcome::Draw => "Draw! Neither side could make progress.",
    });

    let side = match outcome {
        MatchOutcome::Winner(side) => side,
        MatchOutcome::Draw => state.current_turn,
    };
    state.record(side, BattleEvent::MatchEnded(outcome));
    state.finish(outcome);

    info!(
        outcome = ?outcome,
        turn = state.turn_number,
        player_health = state.health(Side::Player),
        opponent_health = state.health(Side::Opponent),
        "match ended"
    );
}
