//! Reading and writing schedule files.

use std::path::Path;

use tracing::debug;

use super::Schedule;
use crate::error::TermcalResult;

impl Schedule {
    /// Parse a schedule from TOML text.
    pub fn from_toml(content: &str) -> TermcalResult<Self> {
        let schedule: Schedule = toml::from_str(content)?;
        Ok(schedule)
    }

    /// Load a schedule file from disk.
    pub fn load(path: &Path) -> TermcalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let schedule = Self::from_toml(&content)?;

        debug!(
            path = %path.display(),
            courses = schedule.courses.len(),
            "loaded schedule"
        );

        Ok(schedule)
    }

    pub fn to_toml(&self) -> TermcalResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the schedule as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> TermcalResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
