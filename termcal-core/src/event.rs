//! The calendar event record.
//!
//! Every row of a schedule (session, workshop, due date, holiday) becomes one
//! `Event`. The `ics` module serializes these without knowing where they came
//! from.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::constants::{MAX_REMINDER_DAYS, UID_DOMAIN};
use crate::error::{TermcalError, TermcalResult};

/// A calendar event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub uid: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub start: EventTime,
    /// `None` for instant events (a deadline has no DTEND)
    pub end: Option<EventTime>,
    /// Reminders/alarms for this event
    pub reminders: Vec<Reminder>,
    /// Whether event blocks time (OPAQUE) or is free (TRANSPARENT)
    pub transparency: Transparency,
}

/// A reminder/alarm for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Minutes before the event to trigger
    pub minutes: i64,
}

impl Reminder {
    /// Convert a reminder offset to whole minutes, rounding up.
    ///
    /// Fails for offsets longer than `MAX_REMINDER_DAYS`.
    pub fn from_duration(duration: std::time::Duration) -> TermcalResult<Self> {
        let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
        let minutes = secs.div_ceil(60);

        if minutes > MAX_REMINDER_DAYS * 24 * 60 {
            return Err(TermcalError::InvalidDuration(format!(
                "reminder {} is longer than {} days",
                humantime::format_duration(duration),
                MAX_REMINDER_DAYS
            )));
        }

        if secs % 60 != 0 {
            warn!(
                reminder = %humantime::format_duration(duration),
                minutes,
                "reminder rounded up to whole minutes"
            );
        }

        Ok(Reminder {
            minutes: minutes as i64,
        })
    }
}

/// Event transparency (busy/free status)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Transparency {
    /// Event blocks time on calendar (default)
    #[default]
    Opaque,
    /// Event does not block time (shows as free)
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTimeUtc(DateTime<Utc>),
}

impl EventTime {
    /// The instant this time starts at, reading all-day dates as local midnight in `tz`.
    pub fn instant(&self, tz: Tz) -> DateTime<Utc> {
        match self {
            EventTime::DateTimeUtc(dt) => *dt,
            EventTime::Date(d) => {
                let midnight = d.and_time(chrono::NaiveTime::MIN);
                tz.from_local_datetime(&midnight)
                    .earliest()
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|| midnight.and_utc())
            }
        }
    }
}

impl Event {
    fn new(summary: String, start: EventTime, end: Option<EventTime>) -> Self {
        Event {
            uid: Self::uid_for(&summary, &start),
            summary,
            description: None,
            location: None,
            url: None,
            start,
            end,
            reminders: Vec::new(),
            transparency: Transparency::Opaque,
        }
    }

    /// A timed event lasting `duration` from `start`.
    pub fn timed(
        summary: impl Into<String>,
        start: DateTime<Utc>,
        duration: Duration,
    ) -> TermcalResult<Self> {
        let summary = summary.into();
        if duration <= Duration::zero() {
            return Err(TermcalError::InvalidDuration(format!(
                "'{}' must last longer than zero",
                summary
            )));
        }

        let end = start.checked_add_signed(duration).ok_or_else(|| {
            TermcalError::InvalidDuration(format!("'{}' ends out of calendar range", summary))
        })?;

        Ok(Self::new(
            summary,
            EventTime::DateTimeUtc(start),
            Some(EventTime::DateTimeUtc(end)),
        ))
    }

    /// An all-day event covering `first_day` through `last_day` inclusive.
    pub fn all_day(
        summary: impl Into<String>,
        first_day: NaiveDate,
        last_day: NaiveDate,
    ) -> TermcalResult<Self> {
        let summary = summary.into();
        if last_day < first_day {
            return Err(TermcalError::InvalidDate(format!(
                "'{}' ends on {} before it starts on {}",
                summary, last_day, first_day
            )));
        }

        // DTEND of an all-day event is exclusive
        let end = last_day
            .succ_opt()
            .ok_or_else(|| TermcalError::InvalidDate(last_day.to_string()))?;

        Ok(Self::new(
            summary,
            EventTime::Date(first_day),
            Some(EventTime::Date(end)),
        ))
    }

    /// A due date. Timed deadlines are instants, date-only deadlines cover the day.
    pub fn deadline(summary: impl Into<String>, at: EventTime) -> TermcalResult<Self> {
        match at {
            EventTime::Date(d) => Self::all_day(summary, d, d),
            EventTime::DateTimeUtc(_) => Ok(Self::new(summary.into(), at, None)),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_url(mut self, url: Option<&str>) -> Self {
        self.url = url.map(str::to_string);
        self
    }

    pub fn with_reminders(mut self, reminders: Vec<Reminder>) -> Self {
        self.reminders = reminders;
        self
    }

    pub fn with_transparency(mut self, transparency: Transparency) -> Self {
        self.transparency = transparency;
        self
    }

    /// Start in the term's time zone; all-day events start at local midnight.
    pub fn local_start(&self, tz: Tz) -> DateTime<Tz> {
        self.start.instant(tz).with_timezone(&tz)
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }

    /// Length of the event, or `None` for instant events.
    pub fn duration(&self) -> Option<Duration> {
        match (&self.start, self.end.as_ref()?) {
            (EventTime::DateTimeUtc(s), EventTime::DateTimeUtc(e)) => Some(*e - *s),
            (EventTime::Date(s), EventTime::Date(e)) => Some(*e - *s),
            (EventTime::Date(s), EventTime::DateTimeUtc(e)) => {
                Some(*e - s.and_time(chrono::NaiveTime::MIN).and_utc())
            }
            (EventTime::DateTimeUtc(s), EventTime::Date(e)) => {
                Some(e.and_time(chrono::NaiveTime::MIN).and_utc() - *s)
            }
        }
    }

    /// Human-readable time span in the term's time zone.
    /// Timed: `Tue 25 Jul 2023 15:30-18:30`
    /// All-day: `Wed 09 Aug 2023` or `Mon 07 Aug 2023 - Fri 11 Aug 2023`
    /// Deadline: `Sun 20 Aug 2023 23:59`
    pub fn render_event_time(&self, tz: Tz) -> String {
        match (&self.start, &self.end) {
            (EventTime::Date(first), Some(EventTime::Date(end))) => {
                let last = end.pred_opt().unwrap_or(*end);
                if last <= *first {
                    first.format("%a %d %b %Y").to_string()
                } else {
                    format!(
                        "{} - {}",
                        first.format("%a %d %b %Y"),
                        last.format("%a %d %b %Y")
                    )
                }
            }
            (EventTime::Date(first), _) => first.format("%a %d %b %Y").to_string(),
            (EventTime::DateTimeUtc(_), end) => {
                let local_start = self.local_start(tz);
                let from = local_start.format("%a %d %b %Y %H:%M").to_string();
                match end {
                    Some(end) => {
                        let local_end = end.instant(tz).with_timezone(&tz);
                        if local_end.date_naive() == local_start.date_naive() {
                            format!("{}-{}", from, local_end.format("%H:%M"))
                        } else {
                            format!("{} - {}", from, local_end.format("%a %d %b %Y %H:%M"))
                        }
                    }
                    None => from,
                }
            }
        }
    }

    /// Stable UID so re-importing the calendar updates events instead of duplicating them.
    fn uid_for(summary: &str, start: &EventTime) -> String {
        let start = match start {
            EventTime::Date(d) => d.format("%Y%m%d").to_string(),
            EventTime::DateTimeUtc(dt) => dt.format("%Y%m%dT%H%M%SZ").to_string(),
        };
        let name = format!("{}|{}", summary, start);
        let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes());
        format!("{}@{}", id, UID_DOMAIN)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}
