//! ICS file generation.
//!
//! This module turns a list of events into one RFC 5545 calendar.

mod generate;

pub use generate::{CalendarMetadata, generate_calendar, write_calendar};
