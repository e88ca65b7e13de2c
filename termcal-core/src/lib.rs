//! Core types for termcal.
//!
//! This crate provides everything the `termcal` binary needs to turn a term
//! timetable into an iCalendar file:
//! - `Event` and related types for calendar events
//! - `session` helpers that name and describe class sessions
//! - `Schedule`, the literal term data (built-in or loaded from TOML)
//! - `ics` module for serializing events to .ics text

pub mod constants;
pub mod error;
pub mod event;
pub mod ics;
pub mod schedule;
pub mod serde_fmt;
pub mod session;
pub mod time;

pub use error::{TermcalError, TermcalResult};
pub use event::{Event, EventTime, Reminder, Transparency};
pub use schedule::Schedule;
pub use session::SessionKind;
