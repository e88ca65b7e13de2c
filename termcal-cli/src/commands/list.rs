use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use termcal_core::{Event, Schedule};

use crate::render::{Render, pluralize};

pub fn run(schedule: Option<&Path>, course: Option<&str>, json: bool) -> Result<()> {
    let schedule = super::load_schedule(schedule)?;
    let (schedule, events) = term_events(schedule, course)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    let tz = schedule.term.tz()?;
    println!(
        "{} {}",
        format!("📅 {}", schedule.term.name).bold(),
        format!("({} {})", events.len(), pluralize("event", events.len())).dimmed()
    );
    for event in &events {
        println!("   {}", event.render(tz));
    }

    Ok(())
}

/// Events of the schedule (or of one course) in chronological order.
fn term_events(schedule: Schedule, course: Option<&str>) -> Result<(Schedule, Vec<Event>)> {
    let schedule = match course {
        Some(code) => match schedule.only_course(code) {
            Some(filtered) => filtered,
            None => {
                let available: Vec<_> = schedule.courses.iter().map(|c| c.code.as_str()).collect();
                anyhow::bail!(
                    "Course '{}' not found. Available: {}",
                    code,
                    available.join(", ")
                );
            }
        },
        None => schedule,
    };

    let tz = schedule.term.tz()?;
    let mut events = schedule
        .events()
        .with_context(|| format!("Invalid schedule for term {}", schedule.term.name))?;
    events.sort_by_key(|e| e.start.instant(tz));

    Ok((schedule, events))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Schedule {
        Schedule::builtin().unwrap()
    }

    #[test]
    fn unknown_course_lists_available_codes() {
        let err = run(None, Some("XX(0000)"), false).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Course 'XX(0000)' not found"), "{}", message);
        assert!(message.contains("MI(2007MK)"), "{}", message);
    }

    #[test]
    fn known_course_lists() {
        run(None, Some("DB(2009MK)"), false).unwrap();
        run(None, None, true).unwrap();
    }

    #[test]
    fn events_are_chronological() {
        let (schedule, events) = term_events(builtin(), None).unwrap();
        let tz = schedule.term.tz().unwrap();

        assert_eq!(events.len(), 3 + 3 * 14 + 2);
        assert!(
            events
                .windows(2)
                .all(|w| w[0].start.instant(tz) <= w[1].start.instant(tz))
        );
        assert_eq!(events[0].summary, "CU Referencing Workshop");

        // GNet follows the first MI lecture even though workshops come first in the table
        let position = |summary: &str| events.iter().position(|e| e.summary == summary).unwrap();
        assert!(position("CU_TRI223_FT_MI(2007MK)_S1_Lec/1") < position("GNet"));
    }

    #[test]
    fn course_filter_keeps_only_that_course() {
        let (_, events) = term_events(builtin(), Some("DB(2009MK)")).unwrap();

        assert_eq!(events.len(), 14);
        assert!(events.iter().all(|e| e.summary.contains("_DB(2009MK)_")));
        assert_eq!(events[0].summary, "CU_TRI223_FT_DB(2009MK)_S1_Lec/1");
    }
}
