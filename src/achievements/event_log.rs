/// Append-only line storage for achievement events.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::EventLogError;

/// Used when no location is configured.
pub const DEFAULT_LOCATION: &str = "achievements.dat";

pub trait EventLog {
    /// Append `line` followed by a newline.
    fn save(&mut self, line: &str) -> Result<(), EventLogError>;

    /// Every saved line in write order; empty when nothing was saved yet.
    fn read(&self) -> Result<Vec<String>, EventLogError>;
}

/// Plain-text file, one event per line, created on first write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEventLog {
    location: PathBuf,
}

impl Default for FileEventLog {
    fn default() -> Self {
        Self {
            location: PathBuf::from(DEFAULT_LOCATION),
        }
    }
}

impl FileEventLog {
    pub fn new(location: impl Into<PathBuf>) -> Result<Self, EventLogError> {
        let location = location.into();
        if location.as_os_str().is_empty() {
            return Err(EventLogError::EmptyLocation);
        }
        Ok(Self { location })
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn set_location(&mut self, location: impl Into<PathBuf>) -> Result<(), EventLogError> {
        let location = location.into();
        if location.as_os_str().is_empty() {
            return Err(EventLogError::EmptyLocation);
        }
        self.location = location;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> EventLogError {
        EventLogError::Io {
            path: self.location.clone(),
            source,
        }
    }
}

impl EventLog for FileEventLog {
    fn save(&mut self, line: &str) -> Result<(), EventLogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.location)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{line}").map_err(|e| self.io_error(e))?;
        log::debug!("Appended event to {}: {line}", self.location.display());
        Ok(())
    }

    fn read(&self) -> Result<Vec<String>, EventLogError> {
        let file = match fs::File::open(&self.location) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.io_error(e))
    }
}

/// Keeps lines in memory; for runs that should leave no file behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryEventLog {
    lines: Vec<String>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl EventLog for MemoryEventLog {
    fn save(&mut self, line: &str) -> Result<(), EventLogError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn read(&self) -> Result<Vec<String>, EventLogError> {
        Ok(self.lines.clone())
    }
}
