use std::time::{Duration, Instant};

/// Running totals for one game session. Never reset mid-game.
#[derive(Clone, Debug)]
pub struct PlayerStatsTracker {
    started: Instant,
    shots_fired: u32,
    shots_hit: u32,
}

impl Default for PlayerStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStatsTracker {
    /// Start the survival clock now.
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Start the survival clock at an earlier instant.
    pub fn started_at(started: Instant) -> Self {
        Self {
            started,
            shots_fired: 0,
            shots_hit: 0,
        }
    }

    pub fn record_shot_fired(&mut self) {
        self.shots_fired = self.shots_fired.saturating_add(1);
    }

    pub fn record_shot_hit(&mut self) {
        self.shots_hit = self.shots_hit.saturating_add(1);
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn shots_hit(&self) -> u32 {
        self.shots_hit
    }

    /// Hits per shot, or exactly 0.0 before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        f64::from(self.shots_hit) / f64::from(self.shots_fired)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whole seconds since the tracker was created.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }
}
