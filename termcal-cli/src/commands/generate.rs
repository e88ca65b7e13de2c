use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use termcal_core::ics::{CalendarMetadata, generate_calendar, write_calendar};

use crate::config::Config;
use crate::render::pluralize;

pub fn run(config: &Config, schedule: Option<&Path>, output: &Path, stdout: bool) -> Result<()> {
    let schedule = super::load_schedule(schedule)?;
    let events = schedule
        .events()
        .with_context(|| format!("Invalid schedule for term {}", schedule.term.name))?;

    let name = config
        .calendar_name
        .clone()
        .unwrap_or_else(|| schedule.term.name.clone());
    let metadata = CalendarMetadata::new(name);

    if stdout {
        print!("{}", generate_calendar(&events, &metadata));
        return Ok(());
    }

    let count = write_calendar(output, &events, &metadata)
        .with_context(|| format!("Failed to write calendar to {}", output.display()))?;

    println!(
        "{}",
        format!(
            "Wrote {} {} to {}",
            count,
            pluralize("event", count),
            output.display()
        )
        .green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_builtin_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("psb.ics");

        run(&Config::default(), None, &output, false).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().filter(|l| *l == "BEGIN:VEVENT").count(), 47);
        assert!(content.contains("X-WR-CALNAME:TRI223"));
    }

    #[test]
    fn calendar_name_comes_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("psb.ics");
        let config = Config {
            calendar_name: Some("Uni".to_string()),
            ..Config::default()
        };

        run(&config, None, &output, false).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("X-WR-CALNAME:Uni"));
    }

    #[test]
    fn missing_schedule_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            &Config::default(),
            Some(&dir.path().join("nope.toml")),
            &dir.path().join("out.ics"),
            false,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Failed to load schedule"));
    }

    #[test]
    fn invalid_schedule_does_not_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let schedule = dir.path().join("schedule.toml");
        std::fs::write(
            &schedule,
            "[term]\nname = \"X\"\nprefix = \"X\"\ntimezone = \"Not/AZone\"\n",
        )
        .unwrap();
        let output = dir.path().join("out.ics");

        assert!(run(&Config::default(), Some(&schedule), &output, false).is_err());
        assert!(!output.exists());
    }
}
