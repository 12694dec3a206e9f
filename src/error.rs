use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::entities::Direction;

/// A ship move that would leave the arena. Expected during play; the
/// controller reports it and carries on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryError {
    pub direction: Direction,
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot move {}. Out of bounds!", self.direction)
    }
}

impl std::error::Error for BoundaryError {}

/// Achievement registration and lookup failures. These indicate wiring bugs
/// and are never swallowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AchievementError {
    EmptyName,
    EmptyDescription,
    Duplicate(String),
    Unknown(String),
}

impl fmt::Display for AchievementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "achievement name cannot be empty"),
            Self::EmptyDescription => write!(f, "achievement description cannot be empty"),
            Self::Duplicate(name) => write!(f, "achievement already registered: {name}"),
            Self::Unknown(name) => write!(f, "no achievement registered with name: {name}"),
        }
    }
}

impl std::error::Error for AchievementError {}

#[derive(Debug)]
pub enum EventLogError {
    EmptyLocation,
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for EventLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLocation => write!(f, "event log location cannot be empty"),
            Self::Io { path, source } => {
                write!(f, "event log I/O failed for {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for EventLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::EmptyLocation => None,
        }
    }
}

/// Fatal failures surfaced by the controller.
#[derive(Debug)]
pub enum GameError {
    Achievement(AchievementError),
    EventLog(EventLogError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Achievement(err) => write!(f, "achievement error: {err}"),
            Self::EventLog(err) => write!(f, "persistence error: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Achievement(err) => Some(err),
            Self::EventLog(err) => Some(err),
        }
    }
}

impl From<AchievementError> for GameError {
    fn from(err: AchievementError) -> Self {
        Self::Achievement(err)
    }
}

impl From<EventLogError> for GameError {
    fn from(err: EventLogError) -> Self {
        Self::EventLog(err)
    }
}

/// A game config that could not be read or describes an unplayable game.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed config: {err}"),
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
