//! The Tri-223 (Jul-Oct 2023) full-time timetable.

use std::time::Duration;

use chrono::NaiveTime;

use super::{
    Course, Holiday, Schedule, Session, Term, Workshop, default_due_reminders, default_duration,
    default_lecture_group, default_location, default_reminders,
};
use crate::error::TermcalResult;
use crate::session::SessionKind::{self, Lecture, Tutorial};
use crate::time::{clock, date};

const YEAR: i32 = 2023;

const TIMETABLE_URL: &str = "https://www.psb-academy.edu.sg/wordpress/wp-content/uploads/2020/11/Tri-223-CU_FTBArts-BM-223_Term-1-Timetable.pdf";

/// (month, day, kind, start time when it differs from the course's)
type Row = (u32, u32, SessionKind, Option<(u32, u32)>);

const NOON: Option<(u32, u32)> = Some((12, 0));

const MI_SESSIONS: &[Row] = &[
    (7, 25, Lecture, None),
    (8, 1, Lecture, None),
    (8, 8, Tutorial, None),
    (8, 14, Lecture, NOON),
    (8, 15, Tutorial, None),
    (8, 21, Lecture, NOON),
    (8, 22, Tutorial, None),
    (8, 29, Lecture, None),
    (9, 5, Tutorial, None),
    (9, 12, Lecture, None),
    (9, 19, Tutorial, None),
    (9, 26, Lecture, None),
    (10, 3, Tutorial, None),
    (10, 10, Lecture, None),
];

const MLM_SESSIONS: &[Row] = &[
    (7, 28, Lecture, None),
    (8, 2, Lecture, None),
    (8, 11, Tutorial, None),
    (8, 16, Lecture, None),
    (8, 23, Tutorial, None),
    (8, 28, Lecture, None),
    (8, 30, Tutorial, None),
    (9, 6, Lecture, None),
    (9, 8, Tutorial, None),
    (9, 13, Lecture, None),
    (9, 20, Tutorial, None),
    (9, 27, Lecture, None),
    (10, 4, Tutorial, None),
    (10, 11, Lecture, None),
];

const DB_SESSIONS: &[Row] = &[
    (7, 27, Lecture, None),
    (8, 3, Lecture, None),
    (8, 7, Tutorial, None),
    (8, 10, Lecture, NOON),
    (8, 17, Tutorial, None),
    (8, 24, Lecture, NOON),
    (8, 31, Tutorial, None),
    (9, 4, Lecture, None),
    (9, 7, Tutorial, None),
    (9, 14, Lecture, None),
    (9, 21, Tutorial, None),
    (9, 28, Lecture, None),
    (10, 5, Tutorial, None),
    (10, 12, Lecture, None),
];

fn sessions(rows: &[Row]) -> TermcalResult<Vec<Session>> {
    rows.iter()
        .map(|&(month, day, kind, time)| {
            Ok(Session {
                date: date(YEAR, month, day)?,
                kind,
                time: time.map(|(h, m)| clock(h, m)).transpose()?,
                duration: None,
                location: None,
                index: None,
            })
        })
        .collect()
}

fn course(
    code: &str,
    lecturer: &str,
    time: NaiveTime,
    tutorial_group: &str,
    rows: &[Row],
) -> TermcalResult<Course> {
    Ok(Course {
        code: code.to_string(),
        lecturer: lecturer.to_string(),
        time,
        lecture_group: default_lecture_group(),
        tutorial_group: tutorial_group.to_string(),
        location: None,
        sessions: sessions(rows)?,
    })
}

fn workshop(
    title: &str,
    host: &str,
    (month, day): (u32, u32),
    (hour, minute): (u32, u32),
    hours: u64,
) -> TermcalResult<Workshop> {
    Ok(Workshop {
        title: title.to_string(),
        host: host.to_string(),
        start: date(YEAR, month, day)?.and_time(clock(hour, minute)?),
        duration: Some(Duration::from_secs(hours * 3600)),
        location: None,
    })
}

fn holiday(name: &str, (month, day): (u32, u32)) -> TermcalResult<Holiday> {
    Ok(Holiday {
        name: name.to_string(),
        first_day: date(YEAR, month, day)?,
        last_day: None,
    })
}

impl Schedule {
    /// The built-in Tri-223 schedule.
    pub fn builtin() -> TermcalResult<Self> {
        let term = Term {
            name: "TRI223".to_string(),
            prefix: "CU_TRI223_FT".to_string(),
            timezone: "Asia/Singapore".to_string(),
            timetable_url: Some(TIMETABLE_URL.to_string()),
            location: default_location(),
            duration: default_duration(),
            reminders: default_reminders(),
            due_reminders: default_due_reminders(),
        };

        let workshops = vec![
            workshop(
                "CU Referencing Workshop",
                "Dr Ng Jia Yun Florence",
                (7, 24),
                (15, 30),
                3,
            )?,
            workshop("GNet", "", (7, 31), (10, 0), 2)?,
            workshop(
                "Marketing Intensive Workshop",
                "Dr Liow Li Sa Melissa",
                (8, 12),
                (9, 0),
                9,
            )?,
        ];

        let courses = vec![
            course(
                "MI(2007MK)",
                "Frank Boey Chong King",
                clock(15, 30)?,
                "Tut_B",
                MI_SESSIONS,
            )?,
            course(
                "MLM(2000HR)",
                "Salitha Nair",
                clock(12, 0)?,
                "Tut/1",
                MLM_SESSIONS,
            )?,
            course(
                "DB(2009MK)",
                "Cheng Biqing Christopher",
                clock(15, 30)?,
                "Tut/1",
                DB_SESSIONS,
            )?,
        ];

        let holidays = vec![
            holiday("National Day", (8, 9))?,
            holiday("Polling Day", (9, 1))?,
        ];

        Ok(Schedule {
            term,
            workshops,
            courses,
            due_dates: Vec::new(),
            holidays,
        })
    }
}
