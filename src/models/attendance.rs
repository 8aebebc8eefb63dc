use super::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

/// One immutable status transition in the attendance log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceLogEntry {
    pub id: String,       // ⇔ attendance_log.id ("<student_id>_<timestamp>")
    pub student_id: i64,  // ⇔ attendance_log.student_id
    pub date: NaiveDate,  // ⇔ attendance_log.date (TEXT "YYYY-MM-DD")
    pub timestamp: i64,   // ⇔ attendance_log.timestamp (ms since epoch)
    pub status: Status,   // ⇔ attendance_log.status
    pub section: String,  // ⇔ attendance_log.section (primary section when written)
}

impl AttendanceLogEntry {
    pub fn new(
        student_id: i64,
        date: NaiveDate,
        timestamp: i64,
        status: Status,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: entry_id(student_id, timestamp),
            student_id,
            date,
            timestamp,
            status,
            section: section.into(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Creation instant in local time, for display.
    pub fn recorded_at(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}

pub fn entry_id(student_id: i64, timestamp: i64) -> String {
    format!("{student_id}_{timestamp}")
}
