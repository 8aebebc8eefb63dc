use serde::{Deserialize, Serialize};
use std::fmt;

/// Current state of a student inside the classroom.
///
/// Only `Absent` counts as absence in reports: a student in the washroom,
/// at an activity or bunking is still marked present for the day.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Present,
    #[default]
    Absent,
    Washroom,
    Activity,
    Bunking,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Present,
        Status::Absent,
        Status::Washroom,
        Status::Activity,
        Status::Bunking,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Status::Present => "present",
            Status::Absent => "absent",
            Status::Washroom => "washroom",
            Status::Activity => "activity",
            Status::Bunking => "bunking",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(Status::Present),
            "absent" => Some(Status::Absent),
            "washroom" => Some(Status::Washroom),
            "activity" => Some(Status::Activity),
            "bunking" => Some(Status::Bunking),
            _ => None,
        }
    }

    /// Lenient parser for user input and imported records.
    pub fn parse(s: &str) -> Option<Self> {
        Status::from_db_str(s.trim().to_lowercase().as_str())
    }

    pub fn counts_as_present(&self) -> bool {
        !matches!(self, Status::Absent)
    }

    /// Single-letter cell used in attendance reports.
    pub fn report_mark(&self) -> &'static str {
        if self.counts_as_present() { "P" } else { "A" }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
