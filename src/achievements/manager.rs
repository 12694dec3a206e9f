use std::collections::HashMap;

use super::achievement::{Achievement, Tier};
use super::event_log::EventLog;
use crate::error::{AchievementError, EventLogError};

/// Registered achievements plus a per-name "mastery already logged" flag, so
/// each mastery line is written at most once per manager.
#[derive(Debug)]
pub struct AchievementManager<E: EventLog> {
    event_log: E,
    achievements: HashMap<String, Achievement>,
    logged: HashMap<String, bool>,
    /// Registration order, for stable snapshots.
    order: Vec<String>,
}

impl<E: EventLog> AchievementManager<E> {
    pub fn new(event_log: E) -> Self {
        Self {
            event_log,
            achievements: HashMap::new(),
            logged: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn event_log(&self) -> &E {
        &self.event_log
    }

    pub fn add_achievement(&mut self, achievement: Achievement) -> Result<(), AchievementError> {
        let name = achievement.name().to_string();
        if self.achievements.contains_key(&name) {
            return Err(AchievementError::Duplicate(name));
        }
        self.achievements.insert(name.clone(), achievement);
        self.logged.insert(name.clone(), false);
        self.order.push(name);
        Ok(())
    }

    /// Set absolute progress (not a delta) for a registered achievement.
    pub fn update_achievement(&mut self, name: &str, progress: f64) -> Result<(), AchievementError> {
        let achievement = self
            .achievements
            .get_mut(name)
            .ok_or_else(|| AchievementError::Unknown(name.to_string()))?;
        achievement.set_progress(progress);
        Ok(())
    }

    /// Append `"<name> - Mastered"` for every achievement that has reached
    /// `Master` and was not logged yet. Returns how many lines were written.
    pub fn log_achievement_mastered(&mut self) -> Result<usize, EventLogError> {
        let mut written = 0;
        for name in &self.order {
            let mastered = self.achievements[name].tier() == Tier::Master;
            let logged = self.logged.entry(name.clone()).or_insert(false);
            if mastered && !*logged {
                self.event_log.save(&format!("{name} - Mastered"))?;
                *logged = true;
                written += 1;
                log::info!("Achievement mastered: {name}");
            }
        }
        Ok(written)
    }

    /// Snapshot in registration order; changes to it do not reach the manager.
    pub fn achievements(&self) -> Vec<Achievement> {
        self.order
            .iter()
            .map(|name| self.achievements[name].clone())
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&Achievement> {
        self.achievements.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.achievements.len()
    }
}
