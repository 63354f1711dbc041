//! Battle configuration.
//!
//! Every numeric rule of the battle lives here so hosts can tune a match
//! without touching the engine. Defaults reproduce the standard ruleset:
//! both sides start at 20 health (ceiling 30) with a full 10 mana, regain
//! 1 mana per turn, and three consecutive turns without a card played end
//! the match in a draw.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Numeric rules for a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Health both sides start with.
    pub starting_health: u32,

    /// Health ceiling for heals.
    pub max_health: u32,

    /// Mana both sides start with.
    pub starting_mana: u32,

    /// Mana ceiling.
    pub max_mana: u32,

    /// Mana regained when a side's turn begins.
    pub mana_per_turn: u32,

    /// Consecutive turns without a card played that end the match in a draw.
    pub skip_draw_threshold: u32,

    /// Damage of the first fatigue event; each later event deals one more.
    pub fatigue_start: u32,

    /// Fraction of a special effect's magnitude applied for the player's cards.
    /// The opponent's fraction comes from its difficulty tier.
    pub player_special_scale: f64,

    /// Seed for opponent decisions.
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_health: 20,
            max_health: 30,
            starting_mana: 10,
            max_mana: 10,
            mana_per_turn: 1,
            skip_draw_threshold: 3,
            fatigue_start: 1,
            player_special_scale: 1.0,
            seed: 42,
        }
    }
}

impl BattleConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the numbers describe a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::Invalid("max_health must be positive".into()));
        }
        if self.starting_health == 0 || self.starting_health > self.max_health {
            return Err(ConfigError::Invalid(format!(
                "starting_health {} outside 1..={}",
                self.starting_health, self.max_health
            )));
        }
        if self.starting_mana > self.max_mana {
            return Err(ConfigError::Invalid(format!(
                "starting_mana {} exceeds max_mana {}",
                self.starting_mana, self.max_mana
            )));
        }
        if self.skip_draw_threshold == 0 {
            return Err(ConfigError::Invalid("skip_draw_threshold must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.player_special_scale) {
            return Err(ConfigError::Invalid(format!(
                "player_special_scale {} outside 0.0..=1.0",
                self.player_special_scale
            )));
        }
        Ok(())
    }

    /// Set the starting health.
    #[must_use]
    pub fn with_starting_health(mut self, health: u32) -> Self {
        self.starting_health = health;
        self
    }

    /// Set the starting mana.
    #[must_use]
    pub fn with_starting_mana(mut self, mana: u32) -> Self {
        self.starting_mana = mana;
        self
    }

    /// Set the draw threshold for consecutive skipped turns.
    #[must_use]
    pub fn with_skip_draw_threshold(mut self, threshold: u32) -> Self {
        self.skip_draw_threshold = threshold;
        self
    }

    /// Set the player's special-effect scale.
    #[must_use]
    pub fn with_player_special_scale(mut self, scale: f64) -> Self {
        self.player_special_scale = scale;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
