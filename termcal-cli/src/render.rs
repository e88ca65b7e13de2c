//! TUI rendering for termcal types.
//!
//! Extension traits that add colored terminal rendering to termcal-core
//! types using owo_colors.

use chrono_tz::Tz;
use owo_colors::OwoColorize;
use termcal_core::event::{Event, Transparency};

/// What kind of row an event came from, judged by its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
    Class,
    Deadline,
    Holiday,
}

impl EventShape {
    pub fn of(event: &Event) -> Self {
        if event.transparency == Transparency::Transparent {
            EventShape::Holiday
        } else if event.end.is_none() || event.is_all_day() {
            EventShape::Deadline
        } else {
            EventShape::Class
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            EventShape::Class => "•",
            EventShape::Deadline => "!",
            EventShape::Holiday => "○",
        }
    }
}

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self, tz: Tz) -> String;
}

impl Render for Event {
    fn render(&self, tz: Tz) -> String {
        let shape = EventShape::of(self);
        let symbol = match shape {
            EventShape::Class => shape.symbol().green().to_string(),
            EventShape::Deadline => shape.symbol().red().to_string(),
            EventShape::Holiday => shape.symbol().blue().to_string(),
        };
        let time = self.render_event_time(tz);

        match &self.location {
            Some(location) => format!(
                "{} {} {} {}",
                symbol,
                self.summary,
                time.dimmed(),
                format!("@ {}", location).dimmed()
            ),
            None => format!("{} {} {}", symbol, self.summary, time.dimmed()),
        }
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use termcal_core::event::EventTime;

    #[test]
    fn shapes_follow_event_kind() {
        let class = Event::timed(
            "Lecture",
            Utc.with_ymd_and_hms(2023, 7, 25, 7, 30, 0).unwrap(),
            Duration::hours(3),
        )
        .unwrap();
        assert_eq!(EventShape::of(&class), EventShape::Class);

        let due = Event::deadline(
            "Essay due",
            EventTime::Date(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()),
        )
        .unwrap();
        assert_eq!(EventShape::of(&due), EventShape::Deadline);

        let day = NaiveDate::from_ymd_opt(2023, 8, 9).unwrap();
        let holiday = Event::all_day("National Day", day, day)
            .unwrap()
            .with_transparency(Transparency::Transparent);
        assert_eq!(EventShape::of(&holiday), EventShape::Holiday);
    }

    #[test]
    fn render_includes_summary_and_location() {
        let class = Event::timed(
            "CU_TRI223_FT_MI(2007MK)_S1_Lec/1",
            Utc.with_ymd_and_hms(2023, 7, 25, 7, 30, 0).unwrap(),
            Duration::hours(3),
        )
        .unwrap()
        .with_location("Main Wing");

        let line = class.render(chrono_tz::Asia::Singapore);
        assert!(line.contains("CU_TRI223_FT_MI(2007MK)_S1_Lec/1"));
        assert!(line.contains("15:30-18:30"));
        assert!(line.contains("Main Wing"));
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 47), "events");
    }
}
