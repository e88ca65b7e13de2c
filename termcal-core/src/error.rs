//! Error types for termcal.

use thiserror::Error;

/// Errors that can occur while building or writing a term calendar.
#[derive(Error, Debug)]
pub enum TermcalError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Unknown time zone '{0}'")]
    UnknownTimezone(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Duplicate session S{index} for course {code}")]
    DuplicateSession { code: String, index: u32 },

    #[error("Holiday '{name}' ends on {last_day} before it starts on {first_day}")]
    InvalidHoliday {
        name: String,
        first_day: chrono::NaiveDate,
        last_day: chrono::NaiveDate,
    },

    #[error("Schedule parse error: {0}")]
    ScheduleParse(#[from] toml::de::Error),

    #[error("Schedule serialization error: {0}")]
    ScheduleSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for termcal operations.
pub type TermcalResult<T> = Result<T, TermcalError>;
