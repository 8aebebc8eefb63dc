//! Read side of the attendance data, as seen by the report pipeline.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{AttendanceLogEntry, Student};
use chrono::NaiveDate;

/// A source of students and attendance log entries.
///
/// The export pipeline receives a store explicitly instead of reaching for
/// a shared connection, so it runs the same against SQLite, a JSON snapshot
/// or a hand-built fake.
pub trait AttendanceStore {
    /// The full roster, sections already normalized.
    fn students(&self) -> AppResult<Vec<Student>>;

    /// Entries dated within `[start, end]` (inclusive), optionally limited
    /// to entries written for `section`. Malformed records are dropped.
    fn log_entries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        section: Option<&str>,
    ) -> AppResult<Vec<AttendanceLogEntry>>;
}

impl AttendanceStore for DbPool {
    fn students(&self) -> AppResult<Vec<Student>> {
        queries::load_students(&self.conn)
    }

    fn log_entries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        section: Option<&str>,
    ) -> AppResult<Vec<AttendanceLogEntry>> {
        queries::load_log_entries(&self.conn, start, end, section)
    }
}
