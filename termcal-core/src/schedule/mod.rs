//! Term schedule data.
//!
//! A `Schedule` is the literal data entry for one term: the term-wide
//! defaults plus tables of workshops, courses (one row per session), due
//! dates and holidays. `Schedule::events` maps every row one-to-one onto an
//! `Event`.

mod builtin;
mod load;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DEFAULT_DUE_REMINDER_MINUTES, DEFAULT_DURATION_HOURS, DEFAULT_LOCATION,
    DEFAULT_REMINDER_MINUTES,
};
use crate::error::{TermcalError, TermcalResult};
use crate::event::{Event, EventTime, Reminder, Transparency};
use crate::serde_fmt;
use crate::session::{self, DEFAULT_LECTURE_GROUP, DEFAULT_TUTORIAL_GROUP, Groups, SessionKind};
use crate::time::{localize, localize_datetime, parse_tz};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub term: Term,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workshops: Vec<Workshop>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<Course>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub due_dates: Vec<DueDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<Holiday>,
}

/// Defaults shared by every event of the term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Calendar name, e.g. "TRI223"
    pub name: String,

    /// Leading part of every session name, e.g. "CU_TRI223_FT"
    pub prefix: String,

    /// IANA time zone the schedule's wall-clock times are in
    pub timezone: String,

    /// Published timetable, attached to every class event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timetable_url: Option<String>,

    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_duration", with = "serde_fmt::duration")]
    pub duration: Duration,

    #[serde(default = "default_reminders", with = "serde_fmt::durations")]
    pub reminders: Vec<Duration>,

    #[serde(default = "default_due_reminders", with = "serde_fmt::durations")]
    pub due_reminders: Vec<Duration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    pub title: String,

    /// Who runs the workshop; may be empty
    #[serde(default)]
    pub host: String,

    #[serde(with = "serde_fmt::local_datetime")]
    pub start: NaiveDateTime,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_fmt::option_duration"
    )]
    pub duration: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course code as it appears on the timetable, e.g. "MI(2007MK)"
    pub code: String,

    pub lecturer: String,

    /// Usual start time of a session
    #[serde(with = "serde_fmt::clock")]
    pub time: NaiveTime,

    #[serde(default = "default_lecture_group")]
    pub lecture_group: String,

    #[serde(default = "default_tutorial_group")]
    pub tutorial_group: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// One timetabled class. Unset fields fall back to the course, then the term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub date: NaiveDate,

    pub kind: SessionKind,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_fmt::option_clock"
    )]
    pub time: Option<NaiveTime>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_fmt::option_duration"
    )]
    pub duration: Option<Duration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Session number; defaults to the 1-based position in the table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDate {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    pub due: LocalMoment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,

    pub first_day: NaiveDate,

    /// Inclusive; a one-day holiday leaves this unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_day: Option<NaiveDate>,
}

/// A local wall-clock moment: a whole day or a date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LocalMoment {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl LocalMoment {
    fn localize(&self, tz: Tz) -> TermcalResult<EventTime> {
        match self {
            LocalMoment::Date(d) => Ok(EventTime::Date(*d)),
            LocalMoment::DateTime(dt) => Ok(EventTime::DateTimeUtc(localize_datetime(*dt, tz)?)),
        }
    }
}

impl FromStr for LocalMoment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(LocalMoment::Date(d));
        }
        serde_fmt::parse_local_datetime(s)
            .map(LocalMoment::DateTime)
            .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM", s))
    }
}

impl TryFrom<String> for LocalMoment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LocalMoment> for String {
    fn from(moment: LocalMoment) -> Self {
        moment.to_string()
    }
}

impl fmt::Display for LocalMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalMoment::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            LocalMoment::DateTime(dt) => {
                write!(f, "{}", dt.format(serde_fmt::LOCAL_DATETIME_FORMAT))
            }
        }
    }
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_duration() -> Duration {
    Duration::from_secs(DEFAULT_DURATION_HOURS * 3600)
}

fn default_reminders() -> Vec<Duration> {
    vec![Duration::from_secs(DEFAULT_REMINDER_MINUTES as u64 * 60)]
}

fn default_due_reminders() -> Vec<Duration> {
    vec![Duration::from_secs(DEFAULT_DUE_REMINDER_MINUTES as u64 * 60)]
}

fn default_lecture_group() -> String {
    DEFAULT_LECTURE_GROUP.to_string()
}

fn default_tutorial_group() -> String {
    DEFAULT_TUTORIAL_GROUP.to_string()
}

fn to_chrono(duration: Duration, what: &str) -> TermcalResult<chrono::Duration> {
    chrono::Duration::from_std(duration)
        .map_err(|_| TermcalError::InvalidDuration(format!("{} is out of range", what)))
}

fn reminders(offsets: &[Duration]) -> TermcalResult<Vec<Reminder>> {
    offsets.iter().copied().map(Reminder::from_duration).collect()
}

impl Term {
    pub fn tz(&self) -> TermcalResult<Tz> {
        parse_tz(&self.timezone)
    }

    /// Build a class event (session or workshop) with the term's defaults.
    fn class_event(
        &self,
        name: String,
        text: &str,
        kind: SessionKind,
        start: chrono::DateTime<chrono::Utc>,
        duration: Duration,
        location: &str,
    ) -> TermcalResult<Event> {
        let duration = to_chrono(duration, &name)?;

        Ok(Event::timed(name, start, duration)?
            .with_description(session::describe(text, kind))
            .with_location(location)
            .with_url(self.timetable_url.as_deref())
            .with_reminders(reminders(&self.reminders)?))
    }
}

impl Course {
    pub fn groups(&self) -> Groups<'_> {
        Groups {
            lecture: &self.lecture_group,
            tutorial: &self.tutorial_group,
        }
    }
}

impl Schedule {
    /// Map every row of the schedule onto an event.
    ///
    /// Order: workshops, courses (table order), due dates, holidays.
    pub fn events(&self) -> TermcalResult<Vec<Event>> {
        let tz = self.term.tz()?;
        let mut events = Vec::new();

        for workshop in &self.workshops {
            events.push(self.workshop_event(workshop, tz)?);
        }

        // Keyed by code so a course split over several tables still gets unique indices
        let mut seen = HashSet::new();
        for course in &self.courses {
            events.extend(self.course_events(course, tz, &mut seen)?);
        }

        for due in &self.due_dates {
            events.push(self.due_event(due, tz)?);
        }

        for holiday in &self.holidays {
            events.push(holiday_event(holiday)?);
        }

        debug!(term = %self.term.name, count = events.len(), "mapped schedule to events");

        Ok(events)
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// A copy of this schedule holding only one course and its due dates.
    ///
    /// Every table with the matching code is kept.
    pub fn only_course(&self, code: &str) -> Option<Schedule> {
        let courses: Vec<Course> = self
            .courses
            .iter()
            .filter(|c| c.code == code)
            .cloned()
            .collect();
        if courses.is_empty() {
            return None;
        }

        Some(Schedule {
            term: self.term.clone(),
            workshops: Vec::new(),
            courses,
            due_dates: self
                .due_dates
                .iter()
                .filter(|d| d.course.as_deref() == Some(code))
                .cloned()
                .collect(),
            holidays: Vec::new(),
        })
    }

    fn workshop_event(&self, workshop: &Workshop, tz: Tz) -> TermcalResult<Event> {
        let start = localize_datetime(workshop.start, tz)?;
        let duration = workshop.duration.unwrap_or(self.term.duration);
        let location = workshop.location.as_deref().unwrap_or(&self.term.location);

        debug!(title = %workshop.title, %start, "workshop");

        self.term.class_event(
            workshop.title.clone(),
            &workshop.host,
            SessionKind::Workshop,
            start,
            duration,
            location,
        )
    }

    fn course_events<'a>(
        &self,
        course: &'a Course,
        tz: Tz,
        seen: &mut HashSet<(&'a str, u32)>,
    ) -> TermcalResult<Vec<Event>> {
        let mut events = Vec::with_capacity(course.sessions.len());

        for (position, session) in course.sessions.iter().enumerate() {
            let index = session.index.unwrap_or(position as u32 + 1);
            if !seen.insert((course.code.as_str(), index)) {
                return Err(TermcalError::DuplicateSession {
                    code: course.code.clone(),
                    index,
                });
            }

            let name = session::session_name(
                &self.term.prefix,
                &course.code,
                index,
                session.kind,
                course.groups(),
            );
            let start = localize(session.date, session.time.unwrap_or(course.time), tz)?;
            let duration = session.duration.unwrap_or(self.term.duration);
            let location = session
                .location
                .as_deref()
                .or(course.location.as_deref())
                .unwrap_or(&self.term.location);

            debug!(%name, %start, kind = %session.kind, "session");

            events.push(self.term.class_event(
                name,
                &course.lecturer,
                session.kind,
                start,
                duration,
                location,
            )?);
        }

        Ok(events)
    }

    fn due_event(&self, due: &DueDate, tz: Tz) -> TermcalResult<Event> {
        let summary = match &due.course {
            Some(code) => format!("[{}] {} due", code, due.title),
            None => format!("{} due", due.title),
        };

        Ok(Event::deadline(summary, due.due.localize(tz)?)?
            .with_url(self.term.timetable_url.as_deref())
            .with_reminders(reminders(&self.term.due_reminders)?))
    }
}

fn holiday_event(holiday: &Holiday) -> TermcalResult<Event> {
    let last_day = holiday.last_day.unwrap_or(holiday.first_day);
    if last_day < holiday.first_day {
        return Err(TermcalError::InvalidHoliday {
            name: holiday.name.clone(),
            first_day: holiday.first_day,
            last_day,
        });
    }

    Ok(Event::all_day(&holiday.name, holiday.first_day, last_day)?
        .with_transparency(Transparency::Transparent))
}
