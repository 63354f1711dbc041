//! Match state: the canonical numeric truth of a battle.
//!
//! ## Combatant
//!
//! Health, mana, and hand for one side.
//!
//! ## MatchState
//!
//! Both combatants plus turn ownership, the shared fatigue counter, the
//! consecutive-skip counter, the running boost, status, the battle log,
//! and the event history.
//!
//! Every mutation helper clamps to the configured bounds, so
//! `0 <= health <= max_health` and `0 <= mana <= max_mana` hold for every
//! reachable state. Only the engine mutates a match; callers get `&MatchState`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::BattleConfig;
use super::event::{BattleEvent, EventRecord};
use super::side::{Side, SideMap};
use crate::cards::{ActiveBoost, Card, CardId};
use crate::opponent::Difficulty;

/// How a finished match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Single winner.
    Winner(Side),
    /// Neither side could make progress.
    Draw,
}

impl MatchOutcome {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, MatchOutcome::Winner(s) if *s == side)
    }
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Ended(MatchOutcome),
}

/// One side's resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub(crate) health: u32,
    pub(crate) mana: u32,
    pub(crate) hand: Vec<Card>,
}

impl Combatant {
    #[must_use]
    pub fn new(health: u32, mana: u32, hand: Vec<Card>) -> Self {
        Self { health, mana, hand }
    }

    #[must_use]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub fn mana(&self) -> u32 {
        self.mana
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Does the hand hold any card affordable with current mana?
    #[must_use]
    pub fn has_playable_card(&self) -> bool {
        self.hand.iter().any(|c| c.is_affordable(self.mana))
    }
}

/// Health and mana ceilings copied from the config at match start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub max_health: u32,
    pub max_mana: u32,
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) combatants: SideMap<Combatant>,
    pub(crate) limits: Limits,
    pub(crate) difficulty: Difficulty,

    /// Whose turn it is.
    pub(crate) current_turn: Side,

    /// Turn number (starts at 1, increments on every hand-over).
    pub(crate) turn_number: u32,

    /// Turns in a row that ended without a card played.
    pub(crate) consecutive_skips: u32,

    /// Damage of the next fatigue event, shared by both sides.
    pub(crate) fatigue_counter: u32,

    pub(crate) active_boost: Option<ActiveBoost>,
    pub(crate) status: MatchStatus,

    /// Human-readable log, append-only.
    pub(crate) battle_log: Vector<String>,

    /// Structured history, append-only.
    pub(crate) history: Vector<EventRecord>,

    sequence: u32,
}

impl MatchState {
    /// Create a fresh in-progress match with the player to act.
    #[must_use]
    pub fn new(
        config: &BattleConfig,
        player_hand: Vec<Card>,
        opponent_hand: Vec<Card>,
        difficulty: Difficulty,
    ) -> Self {
        let mut hands = [Some(player_hand), Some(opponent_hand)];
        let combatants = SideMap::new(|side| {
            Combatant::new(
                config.starting_health,
                config.starting_mana,
                hands[side.index()].take().unwrap_or_default(),
            )
        });

        Self {
            combatants,
            limits: Limits {
                max_health: config.max_health,
                max_mana: config.max_mana,
            },
            difficulty,
            current_turn: Side::Player,
            turn_number: 1,
            consecutive_skips: 0,
            fatigue_counter: config.fatigue_start,
            active_boost: None,
            status: MatchStatus::InProgress,
            battle_log: Vector::new(),
            history: Vector::new(),
            sequence: 0,
        }
    }

    /// Placeholder state before the first match starts.
    #[must_use]
    pub fn not_started(config: &BattleConfig) -> Self {
        let mut state = Self::new(config, Vec::new(), Vec::new(), Difficulty::default());
        state.status = MatchStatus::NotStarted;
        state
    }

    // === Queries ===

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side]
    }

    #[must_use]
    pub fn health(&self, side: Side) -> u32 {
        self.combatants[side].health
    }

    #[must_use]
    pub fn mana(&self, side: Side) -> u32 {
        self.combatants[side].mana
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &[Card] {
        &self.combatants[side].hand
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn consecutive_skips(&self) -> u32 {
        self.consecutive_skips
    }

    #[must_use]
    pub fn fatigue_counter(&self) -> u32 {
        self.fatigue_counter
    }

    #[must_use]
    pub fn active_boost(&self) -> Option<ActiveBoost> {
        self.active_boost
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == MatchStatus::InProgress
    }

    /// The outcome, once the match has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.status {
            MatchStatus::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn battle_log(&self) -> &Vector<String> {
        &self.battle_log
    }

    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        &self.history
    }

    // === Mutation (engine only) ===

    /// Deal damage, floored at 0. Returns the health actually lost.
    pub(crate) fn damage(&mut self, side: Side, amount: u32) -> u32 {
        let combatant = &mut self.combatants[side];
        let before = combatant.health;
        combatant.health = before.saturating_sub(amount);
        before - combatant.health
    }

    /// Heal, capped at the health ceiling. Returns the health actually gained.
    pub(crate) fn heal(&mut self, side: Side, amount: u32) -> u32 {
        let max = self.limits.max_health;
        let combatant = &mut self.combatants[side];
        let before = combatant.health;
        combatant.health = before.saturating_add(amount).min(max).max(before);
        combatant.health - before
    }

    /// Regain mana, capped at the mana ceiling.
    pub(crate) fn regain_mana(&mut self, side: Side, amount: u32) {
        let max = self.limits.max_mana;
        let combatant = &mut self.combatants[side];
        combatant.mana = combatant.mana.saturating_add(amount).min(max).max(combatant.mana);
    }

    /// Remove a card from hand and pay its cost.
    ///
    /// The caller has already checked affordability.
    pub(crate) fn take_card(&mut self, side: Side, card_id: &CardId) -> Option<Card> {
        let combatant = &mut self.combatants[side];
        let pos = combatant.hand.iter().position(|c| &c.id == card_id)?;
        let card = combatant.hand.remove(pos);
        combatant.mana = combatant.mana.saturating_sub(card.mana);
        Some(card)
    }

    pub(crate) fn hand_mut(&mut self, side: Side) -> &mut Vec<Card> {
        &mut self.combatants[side].hand
    }

    /// Append a battle log line.
    pub(crate) fn log(&mut self, line: impl Into<String>) {
        self.battle_log.push_back(line.into());
    }

    /// Append an event record.
    pub(crate) fn record(&mut self, side: Side, event: BattleEvent) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history
            .push_back(EventRecord::new(side, event, self.turn_number, sequence));
    }

    /// End the match. Later calls are ignored.
    pub(crate) fn finish(&mut self, outcome: MatchOutcome) {
        if self.status == MatchStatus::InProgress {
            self.status = MatchStatus::Ended(outcome);
        }
    }
}
