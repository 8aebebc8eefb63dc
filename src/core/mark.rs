use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{AttendanceLogEntry, Status};
use chrono::NaiveDate;

pub struct MarkLogic;

impl MarkLogic {
    /// Record a status change for one student.
    ///
    /// - the entry is appended to the attendance log with the student's
    ///   primary section
    /// - the timestamp is `now_ms`, bumped past the student's previous entry
    ///   so ids stay unique and ordering is strict
    /// - the current status only follows when `date == today`; back-filled
    ///   days only touch the log
    pub fn apply(
        pool: &mut DbPool,
        student_id: i64,
        status: Status,
        date: NaiveDate,
        today: NaiveDate,
        now_ms: i64,
    ) -> AppResult<AttendanceLogEntry> {
        let entry = pool.with_conn(|conn| {
            let tx = conn.transaction()?;

            let student = queries::require_student(&tx, student_id)?;

            let timestamp = match queries::last_timestamp_for(&tx, student_id)? {
                Some(last) if last >= now_ms => last + 1,
                _ => now_ms,
            };

            let entry = AttendanceLogEntry::new(
                student_id,
                date,
                timestamp,
                status,
                student.primary_section(),
            );
            queries::insert_log_entry(&tx, &entry)?;

            if date == today {
                queries::update_student_status(&tx, student_id, status)?;
            }

            tx.commit()?;
            Ok(entry)
        })?;

        audit(
            &pool.conn,
            "mark",
            &student_id.to_string(),
            &format!("{} on {}", status, entry.date_str()),
        );

        Ok(entry)
    }
}
