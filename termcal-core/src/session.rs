//! Session kinds and the timetable naming scheme.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LECTURE_GROUP: &str = "Lec/1";
pub const DEFAULT_TUTORIAL_GROUP: &str = "Tut/1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Workshop,
    Lecture,
    Tutorial,
}

impl SessionKind {
    /// Label appended to event descriptions. The numeric prefixes keep
    /// lectures sorted before tutorials in calendar apps that sort by text.
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Workshop => "Workshop",
            SessionKind::Lecture => "01 Lecture",
            SessionKind::Tutorial => "02 Tutorial",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Workshop => write!(f, "workshop"),
            SessionKind::Lecture => write!(f, "lecture"),
            SessionKind::Tutorial => write!(f, "tutorial"),
        }
    }
}

/// Groups a course's sessions are timetabled under.
#[derive(Debug, Clone, Copy)]
pub struct Groups<'a> {
    pub lecture: &'a str,
    pub tutorial: &'a str,
}

impl Default for Groups<'_> {
    fn default() -> Self {
        Groups {
            lecture: DEFAULT_LECTURE_GROUP,
            tutorial: DEFAULT_TUTORIAL_GROUP,
        }
    }
}

/// Timetable name of a session, e.g. `CU_TRI223_FT_MI(2007MK)_S3_Tut_B`.
///
/// Lectures take the lecture group; every other kind is timetabled as a
/// tutorial.
pub fn session_name(prefix: &str, code: &str, index: u32, kind: SessionKind, groups: Groups) -> String {
    let group = match kind {
        SessionKind::Lecture => groups.lecture,
        SessionKind::Tutorial | SessionKind::Workshop => groups.tutorial,
    };
    format!("{}_{}_S{}_{}", prefix, code, index, group)
}

/// Event description: the host or lecturer, then the kind label on its own line.
pub fn describe(text: &str, kind: SessionKind) -> String {
    format!("{}\n{}", text, kind.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lecture_name_uses_lecture_group() {
        assert_eq!(
            session_name("CU_TRI223_FT", "DB(2009MK)", 1, SessionKind::Lecture, Groups::default()),
            "CU_TRI223_FT_DB(2009MK)_S1_Lec/1"
        );
    }

    #[test]
    fn tutorial_name_uses_tutorial_group() {
        assert_eq!(
            session_name("CU_TRI223_FT", "MLM(2000HR)", 13, SessionKind::Tutorial, Groups::default()),
            "CU_TRI223_FT_MLM(2000HR)_S13_Tut/1"
        );

        let groups = Groups {
            tutorial: "Tut_B",
            ..Groups::default()
        };
        assert_eq!(
            session_name("CU_TRI223_FT", "MI(2007MK)", 3, SessionKind::Tutorial, groups),
            "CU_TRI223_FT_MI(2007MK)_S3_Tut_B"
        );
    }

    #[test]
    fn describe_appends_label_line() {
        assert_eq!(
            describe("Salitha Nair", SessionKind::Lecture),
            "Salitha Nair\n01 Lecture"
        );
        assert_eq!(describe("", SessionKind::Workshop), "\nWorkshop");
    }
}
