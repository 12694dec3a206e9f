//! Achievement tracking.
//!
//! Achievements carry an absolute progress value in `[0.0, 1.0]`, bucketed
//! into tiers. The manager appends a `"<name> - Mastered"` line to an
//! [`EventLog`] the first time each achievement reaches [`Tier::Master`].

pub mod achievement;
pub mod event_log;
pub mod manager;

pub use achievement::{Achievement, Tier, EXPERT_THRESHOLD, MASTER_THRESHOLD};
pub use event_log::{EventLog, FileEventLog, MemoryEventLog, DEFAULT_LOCATION};
pub use manager::AchievementManager;
