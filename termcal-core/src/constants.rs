/// Location used when neither the session nor the term names one.
pub const DEFAULT_LOCATION: &str = "Main Wing";

/// Default length of a class session or workshop, in hours.
pub const DEFAULT_DURATION_HOURS: u64 = 3;

/// Default reminder for sessions, in minutes before start.
pub const DEFAULT_REMINDER_MINUTES: i64 = 60;

/// Default reminder for due dates, in minutes before the deadline.
pub const DEFAULT_DUE_REMINDER_MINUTES: i64 = 24 * 60;

/// Longest accepted reminder offset, in days.
pub const MAX_REMINDER_DAYS: u64 = 366;

/// Domain suffix of generated event UIDs.
pub const UID_DOMAIN: &str = "termcal";

/// PRODID written into every generated calendar.
pub const PRODID: &str = "-//termcal//termcal//EN";
