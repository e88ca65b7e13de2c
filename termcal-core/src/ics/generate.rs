//! ICS file generation.

use std::path::Path;

use chrono::{DateTime, Utc};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};
use tracing::{info, warn};

use crate::constants::PRODID;
use crate::error::TermcalResult;
use crate::event::{Event, EventTime, Transparency};

/// Calendar-level properties written around the events
#[derive(Debug, Clone)]
pub struct CalendarMetadata {
    /// Shown by calendar apps as the calendar's name (X-WR-CALNAME)
    pub name: String,
    /// DTSTAMP of every event
    pub generated_at: DateTime<Utc>,
}

impl CalendarMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        CalendarMetadata {
            name: name.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Generate .ics content holding every event
pub fn generate_calendar(events: &[Event], metadata: &CalendarMetadata) -> String {
    let mut cal = Calendar::new();
    // X-WR-CALNAME - Human-readable calendar name (de facto standard)
    cal.append_property(Property::new("X-WR-CALNAME", &metadata.name));

    let dtstamp = metadata.generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        cal.push(build_event(event, &dtstamp));
    }

    strip_ics_bloat(&cal.done().to_string())
}

/// Write the calendar to `path`, creating parent directories.
///
/// Returns the number of events written.
pub fn write_calendar(
    path: &Path,
    events: &[Event],
    metadata: &CalendarMetadata,
) -> TermcalResult<usize> {
    let content = generate_calendar(events, metadata);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;

    info!(path = %path.display(), events = events.len(), "wrote calendar");

    Ok(events.len())
}

fn build_event(event: &Event, dtstamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);

    // DTSTAMP - required by RFC 5545
    ics_event.add_property("DTSTAMP", dtstamp);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    if let Some(ref end) = event.end {
        add_datetime_property(&mut ics_event, "DTEND", end);
    }

    if let Some(ref desc) = event.description {
        ics_event.description(desc);
    }

    if let Some(ref loc) = event.location {
        ics_event.location(loc);
    }

    if let Some(ref url) = event.url {
        ics_event.add_property("URL", url);
    }

    // TRANSP - only emit if TRANSPARENT (OPAQUE is the default)
    if event.transparency == Transparency::Transparent {
        ics_event.add_property("TRANSP", "TRANSPARENT");
    }

    for reminder in &event.reminders {
        let Some(offset) = chrono::Duration::try_minutes(reminder.minutes) else {
            warn!(uid = %event.uid, minutes = reminder.minutes, "skipping out-of-range reminder");
            continue;
        };
        ics_event.alarm(Alarm::display(&event.summary, Trigger::before_start(offset)));
    }

    ics_event.done()
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add a datetime property with proper formatting based on EventTime variant
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &EventTime) {
    match time {
        EventTime::Date(d) => {
            let mut prop = Property::new(name, d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            ics_event.append_property(prop);
        }
        EventTime::DateTimeUtc(dt) => {
            ics_event.add_property(name, dt.format("%Y%m%dT%H%M%SZ").to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Reminder;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn metadata() -> CalendarMetadata {
        CalendarMetadata {
            name: "TRI223".to_string(),
            generated_at: Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap(),
        }
    }

    fn lecture() -> Event {
        Event::timed(
            "CU_TRI223_FT_DB(2009MK)_S1_Lec/1",
            Utc.with_ymd_and_hms(2023, 7, 27, 7, 30, 0).unwrap(),
            Duration::hours(3),
        )
        .unwrap()
        .with_description("Cheng Biqing Christopher\n01 Lecture")
        .with_location("Main Wing")
        .with_reminders(vec![Reminder { minutes: 60 }])
    }

    fn holiday() -> Event {
        let day = NaiveDate::from_ymd_opt(2023, 8, 9).unwrap();
        Event::all_day("National Day", day, day)
            .unwrap()
            .with_transparency(Transparency::Transparent)
    }

    #[test]
    fn test_generate_calendar_has_one_vevent_per_event() {
        let ics = generate_calendar(&[lecture(), holiday()], &metadata());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "ICS:\n{}", ics);
        assert!(ics.trim_end().ends_with("END:VCALENDAR"), "ICS:\n{}", ics);
        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VEVENT").count(), 2);
        assert!(ics.contains("X-WR-CALNAME:TRI223"), "ICS:\n{}", ics);
        assert!(ics.contains(&format!("PRODID:{}", PRODID)));
        assert!(!ics.contains("CALSCALE"));
    }

    #[test]
    fn test_generate_calendar_timed_event_is_utc() {
        let ics = generate_calendar(&[lecture()], &metadata());

        assert!(ics.contains("DTSTART:20230727T073000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20230727T103000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTSTAMP:20230701T000000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("LOCATION:Main Wing"), "ICS:\n{}", ics);
        assert!(ics.contains("DESCRIPTION:Cheng Biqing Christopher"), "ICS:\n{}", ics);
        assert!(!ics.contains("TRANSP"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_calendar_all_day_event_has_value_date() {
        let ics = generate_calendar(&[holiday()], &metadata());

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20230809"),
            "DTSTART should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20230810"),
            "DTEND should be the exclusive next day. ICS:\n{}",
            ics
        );
        assert!(ics.contains("TRANSP:TRANSPARENT"), "ICS:\n{}", ics);
        assert!(!ics.contains("BEGIN:VALARM"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_calendar_deadline_has_no_dtend() {
        let due = Event::deadline(
            "Essay due",
            EventTime::DateTimeUtc(Utc.with_ymd_and_hms(2023, 8, 20, 15, 59, 0).unwrap()),
        )
        .unwrap();
        let ics = generate_calendar(&[due], &metadata());

        assert!(ics.contains("DTSTART:20230820T155900Z"), "ICS:\n{}", ics);
        assert!(!ics.contains("DTEND"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_calendar_alarm_is_minimal() {
        let ics = generate_calendar(&[lecture()], &metadata());

        assert!(ics.contains("BEGIN:VALARM"), "Should have VALARM");
        assert!(ics.contains("ACTION:DISPLAY"), "Should have ACTION:DISPLAY");
        assert!(ics.contains("TRIGGER"), "Should have TRIGGER");

        let valarm_section: String = ics
            .split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap()
            .to_string();
        assert!(
            !valarm_section.contains("UID:"),
            "VALARM should not have UID. Got:\n{}",
            valarm_section
        );
        assert!(
            !valarm_section.contains("DTSTAMP:"),
            "VALARM should not have DTSTAMP. Got:\n{}",
            valarm_section
        );
    }

    #[test]
    fn test_generate_calendar_one_alarm_per_reminder() {
        let event = lecture().with_reminders(vec![Reminder { minutes: 60 }, Reminder { minutes: 15 }]);
        let ics = generate_calendar(&[event], &metadata());
        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VALARM").count(), 2);
    }

    #[test]
    fn test_generate_calendar_skips_out_of_range_reminder() {
        let event = lecture().with_reminders(vec![Reminder { minutes: i64::MAX }, Reminder { minutes: 15 }]);
        let ics = generate_calendar(&[event], &metadata());
        assert_eq!(ics.lines().filter(|l| *l == "BEGIN:VALARM").count(), 1);
    }

    #[test]
    fn test_generate_calendar_is_deterministic() {
        let a = generate_calendar(&[lecture(), holiday()], &metadata());
        let b = generate_calendar(&[lecture(), holiday()], &metadata());
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_calendar_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("psb.ics");

        let written = write_calendar(&path, &[lecture()], &metadata()).unwrap();
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn test_write_calendar_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten with a file
        let err = write_calendar(dir.path(), &[lecture()], &metadata()).unwrap_err();
        assert!(matches!(err, crate::error::TermcalError::Io(_)));
    }
}
