//! The battle engine.
//!
//! `BattleEngine` owns one match and is its only writer. Every public
//! operation runs to completion synchronously: when a call returns, the
//! opponent has already taken its turn (or turns, if the player keeps
//! skipping) and the match is either waiting on the player or over.
//!
//! ## Flow
//!
//! ```text
//! play_card(Player) ─► resolve ─► opponent dead? ─► end
//!                                  │
//!                                  ▼
//!                        enter opponent turn ─► fatigue / pass / play
//!                                  │
//!                                  ▼
//!                        enter player turn ─► fatigue / pass ─┐
//!                                  │                           │
//!                                  ▼                           │
//!                            await player  ◄───────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::cards::{apply_boost, ActiveBoost, Card, CardId, BoostTerms};
use crate::core::{
    BattleConfig, BattleError, BattleEvent, BattleRng, ConfigError, MatchOutcome, MatchState,
    MatchStatus, Side,
};
use crate::effects::{EffectResolver, Resolution};
use crate::opponent::{choose_card, DecisionContext, Difficulty, OpponentPools};

use super::fatigue::{apply_fatigue, end_match, pass_unplayable};
use super::pacing::{Beat, Instant, Pacer};
use super::snapshot::MatchSnapshot;
use super::turn::{enter_turn, TurnStep};

/// An accepted card play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    /// The player's card.
    pub resolution: Resolution,

    /// Every battle log line appended by the call, including the
    /// opponent's reply.
    pub log_entries: Vec<String>,

    /// Match status once the call returned.
    pub status: MatchStatus,
}

/// `{accepted, reason, log_entries}` view of a play, for UI collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayResponse {
    pub accepted: bool,
    pub reason: Option<String>,
    pub log_entries: Vec<String>,
}

impl PlayResponse {
    #[must_use]
    pub fn from_result(result: Result<PlayOutcome, BattleError>) -> Self {
        match result {
            Ok(outcome) => Self {
                accepted: true,
                reason: None,
                log_entries: outcome.log_entries,
            },
            Err(err) => Self {
                accepted: false,
                reason: Some(err.to_string()),
                log_entries: Vec::new(),
            },
        }
    }
}

/// Runs matches between the player and an AI opponent.
pub struct BattleEngine {
    config: BattleConfig,
    state: MatchState,
    rng: BattleRng,
    pacer: Box<dyn Pacer>,
}

impl BattleEngine {
    /// Create an engine with no delays and no match running.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        let rng = BattleRng::new(config.seed).for_context("opponent");
        Self {
            state: MatchState::not_started(&config),
            config,
            rng,
            pacer: Box::new(Instant),
        }
    }

    /// Like `new`, but rejects inconsistent configs.
    pub fn try_new(config: BattleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Use a different presentation pacer.
    #[must_use]
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    // === Operations ===

    /// Start a new match against the pool of `difficulty`.
    ///
    /// Resets every counter. If the player cannot act on the first turn
    /// the engine skips or fatigues them right away, so the returned state
    /// may already show opponent moves.
    pub fn start_match(
        &mut self,
        player_hand: Vec<Card>,
        pools: &OpponentPools,
        difficulty: Difficulty,
    ) -> &MatchState {
        self.state = MatchState::new(
            &self.config,
            player_hand,
            pools.hand_for(difficulty),
            difficulty,
        );
        self.state.log("Battle has begun! Your turn.");
        self.state.record(Side::Player, BattleEvent::MatchStarted);

        info!(
            difficulty = %difficulty,
            player_cards = self.state.hand(Side::Player).len(),
            opponent_cards = self.state.hand(Side::Opponent).len(),
            "match started"
        );

        let step = self.start_turn(Side::Player);
        self.run_from(Side::Player, step);
        &self.state
    }

    /// Play a card from `side`'s hand.
    ///
    /// Rejections leave the match untouched.
    pub fn play_card(&mut self, side: Side, card_id: &CardId) -> Result<PlayOutcome, BattleError> {
        if let Err(err) = self.check_play(side, card_id) {
            warn!(side = %side, card = %card_id, error = %err, "play rejected");
            return Err(err);
        }

        let log_start = self.state.battle_log().len();
        let resolution = self
            .resolve(side, card_id)
            .ok_or_else(|| BattleError::CardNotInHand(card_id.clone()))?;

        self.run_from(side, TurnStep::Passed);

        Ok(PlayOutcome {
            resolution,
            log_entries: self.state.battle_log().iter().skip(log_start).cloned().collect(),
            status: self.state.status(),
        })
    }

    /// Player passes without playing. Does not count as a skip.
    pub fn end_turn_manually(&mut self) -> Result<Vec<String>, BattleError> {
        self.check_player_turn()?;

        let log_start = self.state.battle_log().len();
        self.state.log("You ended your turn.");
        self.state.record(Side::Player, BattleEvent::TurnEnded);
        debug!(turn = self.state.turn_number(), "player passed");

        self.run_from(Side::Player, TurnStep::Passed);
        Ok(self.state.battle_log().iter().skip(log_start).cloned().collect())
    }

    /// Stake tokens for a temporary boost to the player's hand.
    ///
    /// A new boost replaces a running one; cards are restored before the
    /// new percentage is applied, so boosts never stack.
    pub fn activate_boost(&mut self, stake: u32) -> Result<BoostTerms, BattleError> {
        if !self.state.is_in_progress() {
            warn!(stake, "boost rejected: match not in progress");
            return Err(BattleError::MatchNotInProgress);
        }
        if stake == 0 {
            warn!(stake, "boost rejected: empty stake");
            return Err(BattleError::InvalidStake(stake));
        }

        let terms = BoostTerms::from_stake(stake);
        for card in self.state.hand_mut(Side::Player).iter_mut() {
            apply_boost(card, terms.percentage);
        }
        self.state.active_boost = Some(ActiveBoost::from(terms));

        self.state.log(format!(
            "Staked {} MONDO: +{}% card power for {} turns.",
            stake, terms.percentage, terms.turns
        ));
        self.state.record(
            Side::Player,
            BattleEvent::BoostActivated {
                percentage: terms.percentage,
                turns: terms.turns,
            },
        );
        info!(stake, percentage = terms.percentage, turns = terms.turns, "boost activated");

        Ok(terms)
    }

    /// Cards `side` can afford right now, in hand order.
    #[must_use]
    pub fn playable_cards(&self, side: Side) -> Vec<&Card> {
        let mana = self.state.mana(side);
        self.state
            .hand(side)
            .iter()
            .filter(|card| card.is_affordable(mana))
            .collect()
    }

    /// Encode the running match for later `restore`.
    pub fn snapshot(&self) -> Result<Vec<u8>, BattleError> {
        MatchSnapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
        }
        .encode()
    }

    /// Replace the current match with a snapshot.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), BattleError> {
        let snapshot = MatchSnapshot::decode(bytes)?;
        self.state = snapshot.state;
        self.rng = BattleRng::from_state(&snapshot.rng);
        debug!(turn = self.state.turn_number(), "match restored");
        Ok(())
    }

    // === Validation ===

    fn check_play(&self, side: Side, card_id: &CardId) -> Result<(), BattleError> {
        if !self.state.is_in_progress() {
            return Err(BattleError::MatchNotInProgress);
        }

        let current = self.state.current_turn();
        if side != current {
            return Err(BattleError::InvalidTurn {
                attempted: side,
                current,
            });
        }

        let card = self
            .state
            .hand(side)
            .iter()
            .find(|c| &c.id == card_id)
            .ok_or_else(|| BattleError::CardNotInHand(card_id.clone()))?;

        let available = self.state.mana(side);
        if !card.is_affordable(available) {
            return Err(BattleError::InsufficientMana {
                required: card.mana,
                available,
            });
        }

        Ok(())
    }

    fn check_player_turn(&self) -> Result<(), BattleError> {
        let result = if !self.state.is_in_progress() {
            Err(BattleError::MatchNotInProgress)
        } else if self.state.current_turn() != Side::Player {
            Err(BattleError::InvalidTurn {
                attempted: Side::Player,
                current: self.state.current_turn(),
            })
        } else {
            Ok(())
        };

        if let Err(err) = &result {
            warn!(error = %err, "end turn rejected");
        }
        result
    }

    // === Turn machinery ===

    /// Resolve a validated play and check for a kill.
    fn resolve(&mut self, side: Side, card_id: &CardId) -> Option<Resolution> {
        let scale = match side {
            Side::Player => self.config.player_special_scale,
            Side::Opponent => self.state.difficulty().special_scale(),
        };

        let resolution = EffectResolver::resolve_play(&mut self.state, side, card_id, scale)?;
        self.state.consecutive_skips = 0;
        self.state.record(
            side,
            BattleEvent::CardPlayed {
                card_id: card_id.clone(),
                resolution: resolution.clone(),
            },
        );

        if self.state.health(side.opposite()) == 0 {
            end_match(&mut self.state, MatchOutcome::Winner(side));
        }

        Some(resolution)
    }

    /// Keep handing the turn over until the player must act or the match ends.
    fn run_from(&mut self, mut side: Side, mut step: TurnStep) {
        while step == TurnStep::Passed && self.state.is_in_progress() {
            side = side.opposite();
            self.pacer.pause(Beat::TurnHandOver);
            enter_turn(&mut self.state, side, self.config.mana_per_turn);
            step = self.start_turn(side);
        }

        if !self.state.is_in_progress() {
            self.pacer.pause(Beat::MatchEnd);
        }
    }

    /// Decide what `side` does at the start of its turn.
    fn start_turn(&mut self, side: Side) -> TurnStep {
        let threshold = self.config.skip_draw_threshold;
        let combatant = self.state.combatant(side);

        if combatant.hand().is_empty() {
            return apply_fatigue(&mut self.state, side, threshold);
        }
        if !combatant.has_playable_card() {
            return pass_unplayable(&mut self.state, side, threshold);
        }

        match side {
            Side::Player => TurnStep::AwaitInput,
            Side::Opponent => self.opponent_turn(),
        }
    }

    fn opponent_turn(&mut self) -> TurnStep {
        self.pacer.pause(Beat::OpponentThinking);

        let difficulty = self.state.difficulty();
        let ctx = DecisionContext {
            hand: self.state.hand(Side::Opponent),
            opponent_mana: self.state.mana(Side::Opponent),
            opponent_health: self.state.health(Side::Opponent),
            player_health: self.state.health(Side::Player),
            player_mana: self.state.mana(Side::Player),
        };

        let Some(card_id) =
            choose_card(difficulty, &ctx, &mut self.rng).map(|i| ctx.hand[i].id.clone())
        else {
            return pass_unplayable(&mut self.state, Side::Opponent, self.config.skip_draw_threshold);
        };

        debug!(
            difficulty = %difficulty,
            card = %card_id,
            candidates = ctx.affordable().len(),
            "opponent chose card"
        );

        // Validated above: the card is in hand and affordable.
        if self.resolve(Side::Opponent, &card_id).is_none() {
            return TurnStep::Passed;
        }

        if self.state.is_in_progress() {
            TurnStep::Passed
        } else {
            TurnStep::Ended
        }
    }
}
