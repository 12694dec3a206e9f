/// Game balance constants.
///
/// Every tunable number lives in one `GameConfig` value that is handed to the
/// simulation at construction. A JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::{Arena, Position};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ────────────────────────────────────────────────────────────────
    pub width: i32,
    pub height: i32,

    // ── Ship ─────────────────────────────────────────────────────────────────
    pub ship_start_x: i32,
    pub ship_start_y: i32,
    pub ship_max_health: i32,

    // ── Levels & spawning ────────────────────────────────────────────────────
    pub start_level: u32,
    /// Percentage chance per tick of an asteroid appearing.
    pub start_spawn_rate: u32,
    /// Added to the spawn rate on every level-up.
    pub spawn_rate_increase: u32,
    /// Score needed per level: level-up happens at `level * score_threshold`.
    pub score_threshold: u32,
    /// Enemy chance as a fraction of the asteroid chance.
    pub enemy_spawn_factor: f64,
    /// Power-up chance as a fraction of the asteroid chance.
    pub power_up_spawn_factor: f64,
    /// Falling objects advance one row when `tick % fall_interval == 0`.
    pub fall_interval: u64,

    // ── Damage & effects ─────────────────────────────────────────────────────
    pub asteroid_damage: i32,
    pub enemy_damage: i32,
    pub shield_bonus_points: u32,
    pub health_restore: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,

            ship_start_x: 5,
            ship_start_y: 10,
            ship_max_health: 100,

            start_level: 1,
            start_spawn_rate: 2,
            spawn_rate_increase: 5,
            score_threshold: 100,
            enemy_spawn_factor: 0.5,
            power_up_spawn_factor: 0.25,
            fall_interval: 1,

            asteroid_damage: 10,
            enemy_damage: 20,
            shield_bonus_points: 50,
            health_restore: 20,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(reason)) };
        if self.width <= 0 || self.height <= 0 {
            return invalid(format!(
                "arena must be at least 1x1, got {}x{}",
                self.width, self.height
            ));
        }
        if self.ship_max_health <= 0 {
            return invalid(format!(
                "ship_max_health must be positive, got {}",
                self.ship_max_health
            ));
        }
        if !self.arena().contains(self.ship_start()) {
            return invalid(format!(
                "ship start {} is outside the {}x{} arena",
                self.ship_start(),
                self.width,
                self.height
            ));
        }
        for (name, value) in [
            ("asteroid_damage", self.asteroid_damage),
            ("enemy_damage", self.enemy_damage),
            ("health_restore", self.health_restore),
        ] {
            if value < 0 {
                return invalid(format!("{name} cannot be negative, got {value}"));
            }
        }
        Ok(())
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.width, self.height)
    }

    pub fn ship_start(&self) -> Position {
        Position::new(self.ship_start_x, self.ship_start_y)
    }
}
