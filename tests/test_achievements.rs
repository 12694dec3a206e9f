use std::fs;
use std::io;

use proptest::prelude::*;
use tempfile::TempDir;

use space_shooter::achievements::*;
use space_shooter::error::{AchievementError, EventLogError};

fn manager_with(names: &[&str]) -> AchievementManager<MemoryEventLog> {
    let mut manager = AchievementManager::new(MemoryEventLog::new());
    for name in names {
        manager
            .add_achievement(Achievement::new(*name, "test achievement").unwrap())
            .unwrap();
    }
    manager
}

/// Refuses the first `failures` saves, then behaves like `MemoryEventLog`.
struct FlakyLog {
    failures: usize,
    inner: MemoryEventLog,
}

impl EventLog for FlakyLog {
    fn save(&mut self, line: &str) -> Result<(), EventLogError> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(EventLogError::Io {
                path: "flaky".into(),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            });
        }
        self.inner.save(line)
    }

    fn read(&self) -> Result<Vec<String>, EventLogError> {
        self.inner.read()
    }
}

// ── Tiers ─────────────────────────────────────────────────────────────────────

#[test]
fn tier_boundaries() {
    assert_eq!(Tier::for_progress(0.0), Tier::Novice);
    assert_eq!(Tier::for_progress(0.4999), Tier::Novice);
    assert_eq!(Tier::for_progress(0.5), Tier::Expert);
    assert_eq!(Tier::for_progress(0.998), Tier::Expert);
    assert_eq!(Tier::for_progress(0.999), Tier::Master);
    assert_eq!(Tier::for_progress(1.0), Tier::Master);
}

proptest! {
    #[test]
    fn tiers_partition_unit_interval(progress in 0.0f64..=1.0) {
        let tier = Tier::for_progress(progress);
        let expected = if progress < EXPERT_THRESHOLD {
            Tier::Novice
        } else if progress < MASTER_THRESHOLD {
            Tier::Expert
        } else {
            Tier::Master
        };
        prop_assert_eq!(tier, expected);
    }

    #[test]
    fn stored_progress_is_always_in_range(progress in proptest::num::f64::ANY) {
        let mut achievement = Achievement::new("A", "B").unwrap();
        achievement.set_progress(progress);
        prop_assert!((0.0..=1.0).contains(&achievement.progress()));
    }
}

// ── Registration ──────────────────────────────────────────────────────────────

#[test]
fn duplicate_name_is_rejected() {
    let mut manager = manager_with(&["Survivor"]);
    let err = manager
        .add_achievement(Achievement::new("Survivor", "again").unwrap())
        .unwrap_err();
    assert_eq!(err, AchievementError::Duplicate("Survivor".to_string()));
    assert_eq!(manager.len(), 1);
}

#[test]
fn updating_unknown_name_is_an_error() {
    let mut manager = manager_with(&["Survivor"]);
    let err = manager.update_achievement("Pacifist", 0.5).unwrap_err();
    assert_eq!(err, AchievementError::Unknown("Pacifist".to_string()));
}

#[test]
fn update_sets_absolute_progress() {
    let mut manager = manager_with(&["Survivor"]);
    manager.update_achievement("Survivor", 0.6).unwrap();
    manager.update_achievement("Survivor", 0.2).unwrap();
    let achievement = manager.get("Survivor").unwrap();
    assert_eq!(achievement.progress(), 0.2);
    assert_eq!(achievement.tier(), Tier::Novice);
}

#[test]
fn snapshot_keeps_registration_order_and_is_detached() {
    let mut manager = manager_with(&["Survivor", "Enemy Exterminator", "Sharp Shooter"]);
    let mut snapshot = manager.achievements();
    let names: Vec<&str> = snapshot.iter().map(Achievement::name).collect();
    assert_eq!(names, ["Survivor", "Enemy Exterminator", "Sharp Shooter"]);

    snapshot[0].set_progress(1.0);
    assert_eq!(manager.get("Survivor").unwrap().progress(), 0.0);
    assert_eq!(manager.log_achievement_mastered().unwrap(), 0);
}

// ── Mastery logging ───────────────────────────────────────────────────────────

#[test]
fn mastery_is_logged_exactly_once() {
    let mut manager = manager_with(&["Survivor", "Sharp Shooter"]);
    manager.update_achievement("Sharp Shooter", 1.0).unwrap();

    assert_eq!(manager.log_achievement_mastered().unwrap(), 1);
    assert_eq!(manager.log_achievement_mastered().unwrap(), 0);
    manager.update_achievement("Sharp Shooter", 1.0).unwrap();
    assert_eq!(manager.log_achievement_mastered().unwrap(), 0);

    assert_eq!(manager.event_log().lines(), ["Sharp Shooter - Mastered"]);
}

#[test]
fn dropping_below_master_does_not_relog() {
    let mut manager = manager_with(&["Survivor"]);
    manager.update_achievement("Survivor", 1.0).unwrap();
    manager.log_achievement_mastered().unwrap();
    manager.update_achievement("Survivor", 0.3).unwrap();
    manager.log_achievement_mastered().unwrap();
    manager.update_achievement("Survivor", 1.0).unwrap();
    manager.log_achievement_mastered().unwrap();
    assert_eq!(manager.event_log().lines().len(), 1);
}

#[test]
fn expert_progress_is_not_logged() {
    let mut manager = manager_with(&["Survivor"]);
    manager.update_achievement("Survivor", 0.998).unwrap();
    assert_eq!(manager.log_achievement_mastered().unwrap(), 0);
    assert!(manager.event_log().lines().is_empty());
}

#[test]
fn failed_save_is_reported_and_retried() {
    let log = FlakyLog {
        failures: 1,
        inner: MemoryEventLog::new(),
    };
    let mut manager = AchievementManager::new(log);
    manager
        .add_achievement(Achievement::new("Survivor", "Survive").unwrap())
        .unwrap();
    manager.update_achievement("Survivor", 1.0).unwrap();

    assert!(manager.log_achievement_mastered().is_err());
    assert_eq!(manager.log_achievement_mastered().unwrap(), 1);
    assert_eq!(manager.event_log().read().unwrap(), ["Survivor - Mastered"]);
}

// ── FileEventLog ──────────────────────────────────────────────────────────────

#[test]
fn default_location_is_achievements_dat() {
    assert_eq!(
        FileEventLog::default().location(),
        std::path::Path::new("achievements.dat")
    );
}

#[test]
fn empty_location_is_rejected() {
    assert!(matches!(
        FileEventLog::new(""),
        Err(EventLogError::EmptyLocation)
    ));
    let mut log = FileEventLog::default();
    assert!(log.set_location("").is_err());
    assert_eq!(log.location(), std::path::Path::new(DEFAULT_LOCATION));
}

#[test]
fn missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let log = FileEventLog::new(dir.path().join("nothing.dat")).unwrap();
    assert!(log.read().unwrap().is_empty());
}

#[test]
fn saves_append_lines_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.dat");
    let mut log = FileEventLog::new(&path).unwrap();
    log.save("Survivor - Mastered").unwrap();
    log.save("Sharp Shooter - Mastered").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Survivor - Mastered\nSharp Shooter - Mastered\n"
    );

    // A fresh handle sees the same history.
    let reopened = FileEventLog::new(&path).unwrap();
    assert_eq!(
        reopened.read().unwrap(),
        ["Survivor - Mastered", "Sharp Shooter - Mastered"]
    );
}

#[test]
fn existing_content_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.dat");
    fs::write(&path, "Enemy Exterminator - Mastered\n").unwrap();

    let mut log = FileEventLog::new(&path).unwrap();
    log.save("Survivor - Mastered").unwrap();
    assert_eq!(log.read().unwrap().len(), 2);
}

#[test]
fn writing_to_a_directory_fails_with_io_error() {
    let dir = TempDir::new().unwrap();
    let mut log = FileEventLog::new(dir.path()).unwrap();
    let err = log.save("Survivor - Mastered").unwrap_err();
    assert!(matches!(err, EventLogError::Io { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn manager_persists_through_file_log() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("achievements.dat");
    let mut manager = AchievementManager::new(FileEventLog::new(&path).unwrap());
    manager
        .add_achievement(Achievement::new("Survivor", "Survive").unwrap())
        .unwrap();
    manager.update_achievement("Survivor", 1.0).unwrap();
    manager.log_achievement_mastered().unwrap();
    manager.log_achievement_mastered().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Survivor - Mastered\n");
}
