pub mod generate;
pub mod init;
pub mod list;

use std::path::Path;

use anyhow::{Context, Result};
use termcal_core::Schedule;

/// Load the schedule file at `path`, or the built-in schedule when there is none.
pub fn load_schedule(path: Option<&Path>) -> Result<Schedule> {
    match path {
        Some(path) => Schedule::load(path)
            .with_context(|| format!("Failed to load schedule from {}", path.display())),
        None => {
            tracing::debug!("using built-in schedule");
            Schedule::builtin().context("Built-in schedule is invalid")
        }
    }
}
