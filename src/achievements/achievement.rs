use std::fmt;

use crate::error::AchievementError;

/// Lowest progress counted as `Expert`.
pub const EXPERT_THRESHOLD: f64 = 0.5;
/// Lowest progress counted as `Master`.
pub const MASTER_THRESHOLD: f64 = 0.999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Novice,
    Expert,
    Master,
}

impl Tier {
    pub fn for_progress(progress: f64) -> Self {
        if progress < EXPERT_THRESHOLD {
            Tier::Novice
        } else if progress < MASTER_THRESHOLD {
            Tier::Expert
        } else {
            Tier::Master
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Novice => "Novice",
            Tier::Expert => "Expert",
            Tier::Master => "Master",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Achievement {
    name: String,
    description: String,
    progress: f64,
}

impl Achievement {
    /// A fresh achievement at zero progress.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, AchievementError> {
        let name = name.into();
        let description = description.into();
        if name.is_empty() {
            return Err(AchievementError::EmptyName);
        }
        if description.is_empty() {
            return Err(AchievementError::EmptyDescription);
        }
        Ok(Self {
            name,
            description,
            progress: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Replace the progress value, clamped into `[0.0, 1.0]`. NaN counts as 0.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
    }

    pub fn tier(&self) -> Tier {
        Tier::for_progress(self.progress)
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.0}% ({})",
            self.name,
            self.progress * 100.0,
            self.tier()
        )
    }
}
