//! # Settings Module
//!
//! Tunable timings and rules for a play session.

use crate::{ChaseError, ChaseResult, Intelligence};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a play session.
///
/// All durations and periods are in milliseconds and must be strictly
/// positive. Missing fields are rejected when loading from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameSettings {
    /// Time between player moves
    pub player_speed: u64,
    /// Time between pursuer moves
    pub enemy_speed: u64,
    /// Length of a scatter phase
    pub scatter_duration: u64,
    /// Length of a chase phase
    pub chase_duration: u64,
    /// Length of one frighten window
    pub frighten_duration: u64,
    /// Time a killed pursuer spends in the spawn
    pub kill_duration: u64,
    /// Time between bonus placement attempts
    pub bonus_period: u64,
    /// Delay between consecutive pursuers leaving the spawn
    pub come_out_period: u64,
    /// Factor applied to `enemy_speed` while pursuers are frightened
    pub frighten_speed_multiplier: f32,
    /// Lives at the start of a session
    pub lives: u32,
    /// Pursuer intelligence, 0 to 2
    pub intelligence: Intelligence,
}

impl GameSettings {
    /// Creates the default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use chaser::GameSettings;
    ///
    /// let settings = GameSettings::new();
    /// assert!(settings.validate().is_ok());
    /// assert!(settings.enemy_speed > settings.player_speed);
    /// ```
    pub fn new() -> Self {
        Self {
            player_speed: 200,
            enemy_speed: 250,
            scatter_duration: 7_000,
            chase_duration: 20_000,
            frighten_duration: 6_000,
            kill_duration: 5_000,
            bonus_period: 15_000,
            come_out_period: 3_000,
            frighten_speed_multiplier: 1.5,
            lives: 3,
            intelligence: Intelligence::High,
        }
    }

    /// Creates settings with short timings for tests.
    pub fn for_testing() -> Self {
        Self {
            player_speed: 100,
            enemy_speed: 150,
            scatter_duration: 1_000,
            chase_duration: 2_000,
            frighten_duration: 800,
            kill_duration: 500,
            bonus_period: 3_000,
            come_out_period: 200,
            frighten_speed_multiplier: 2.0,
            lives: 3,
            intelligence: Intelligence::High,
        }
    }

    /// Rejects zero timings, a non-positive multiplier and zero lives.
    pub fn validate(&self) -> ChaseResult<()> {
        let timings = [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("scatter_duration", self.scatter_duration),
            ("chase_duration", self.chase_duration),
            ("frighten_duration", self.frighten_duration),
            ("kill_duration", self.kill_duration),
            ("bonus_period", self.bonus_period),
            ("come_out_period", self.come_out_period),
        ];
        if let Some((name, _)) = timings.iter().find(|(_, value)| *value == 0) {
            return Err(ChaseError::InvalidSettings(format!(
                "{} must be greater than zero",
                name
            )));
        }

        let multiplier = self.frighten_speed_multiplier;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ChaseError::InvalidSettings(format!(
                "frighten_speed_multiplier must be a positive number, got {}",
                multiplier
            )));
        }

        if self.lives == 0 {
            return Err(ChaseError::InvalidSettings(
                "lives must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Period of a frightened pursuer's moves.
    pub fn frightened_enemy_speed(&self) -> u64 {
        let scaled = (self.enemy_speed as f64 * self.frighten_speed_multiplier as f64).round();
        (scaled as u64).max(1)
    }

    /// Parses and validates settings from JSON.
    pub fn from_json(json: &str) -> ChaseResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a JSON settings file.
    pub fn load<P: AsRef<Path>>(path: P) -> ChaseResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the settings to pretty JSON.
    pub fn to_json(&self) -> ChaseResult<String> {
        serde_json::to_string_pretty(self).map_err(ChaseError::from)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new()
    }
}
