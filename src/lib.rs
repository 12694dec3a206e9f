//! Grid-based space shooter: a ship dodges and shoots falling asteroids and
//! enemies, collects power-ups, and earns achievements along the way.
//!
//! - `entities`: positions and every object living in the arena
//! - `model`: the per-tick simulation (movement, spawning, collisions, levels)
//! - `stats`: shots fired / hit and survival time
//! - `achievements`: tiered progress tracking persisted to an event log
//! - `controller`: sequences one tick and translates player input
//! - `screen` / `display`: the presentation seam and its terminal renderer
//! - `config` / `logging`: game constants and the binary's file logger

pub mod achievements;
pub mod config;
pub mod controller;
pub mod display;
pub mod entities;
pub mod error;
pub mod logging;
pub mod model;
pub mod screen;
pub mod stats;

pub use achievements::{Achievement, AchievementManager, EventLog, FileEventLog, MemoryEventLog, Tier};
pub use config::GameConfig;
pub use controller::{Command, ControllerState, GameController, GameSummary};
pub use model::{GameEvent, GameModel};
pub use screen::Screen;
pub use stats::PlayerStatsTracker;
