//! Localizing term wall-clock times.
//!
//! Schedule data is written in the term's local time. Events are stored in
//! UTC so the generated calendar needs no VTIMEZONE block.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{TermcalError, TermcalResult};

/// Parse an IANA time zone name such as `Asia/Singapore`.
pub fn parse_tz(tzid: &str) -> TermcalResult<Tz> {
    tzid.parse::<Tz>()
        .map_err(|_| TermcalError::UnknownTimezone(tzid.to_string()))
}

/// Convert a local wall-clock date and time in `tz` to UTC.
///
/// Fails when the local time falls in a DST gap or is ambiguous.
pub fn localize(date: NaiveDate, time: NaiveTime, tz: Tz) -> TermcalResult<DateTime<Utc>> {
    localize_datetime(date.and_time(time), tz)
}

pub fn localize_datetime(local: NaiveDateTime, tz: Tz) -> TermcalResult<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, _) => Err(TermcalError::InvalidTime(format!(
            "{} is ambiguous in {}",
            local,
            tz.name()
        ))),
        LocalResult::None => Err(TermcalError::InvalidTime(format!(
            "{} does not exist in {}",
            local,
            tz.name()
        ))),
    }
}

/// Build a date from year, month and day, failing on impossible dates.
pub fn date(year: i32, month: u32, day: u32) -> TermcalResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TermcalError::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)))
}

/// Build a clock time from hour and minute.
pub fn clock(hour: u32, minute: u32) -> TermcalResult<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| TermcalError::InvalidTime(format!("{:02}:{:02}", hour, minute)))
}
