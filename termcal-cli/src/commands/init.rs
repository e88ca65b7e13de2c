use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use termcal_core::Schedule;

/// Write the built-in schedule as an editable TOML file.
pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists.\n\
             If you want to replace it, use: termcal init --force",
            path.display()
        );
    }

    let schedule = Schedule::builtin().context("Built-in schedule is invalid")?;
    schedule
        .save(path)
        .with_context(|| format!("Failed to write schedule to {}", path.display()))?;

    println!("{}", format!("Created {}", path.display()).green());
    println!(
        "{}",
        format!(
            "Edit it, then run `termcal generate --schedule {}`",
            path.display()
        )
        .dimmed()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.toml");

        run(&path, false).unwrap();

        let loaded = Schedule::load(&path).unwrap();
        assert_eq!(loaded.courses.len(), 3);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.toml");
        std::fs::write(&path, "# mine").unwrap();

        let err = run(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        run(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[term]"));
    }
}
