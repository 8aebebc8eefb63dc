use crate::errors::{AppError, AppResult};
use crate::models::raw::{RawLogEntry, RawScalar};
use crate::models::{AttendanceLogEntry, Note, Status, Student};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::HashMap;

const STUDENT_COLUMNS: &str = "id, name, admission_number, status, last_reset_date";

fn map_student_row(row: &Row) -> rusqlite::Result<Student> {
    let status_str: String = row.get("status")?;
    let reset_str: Option<String> = row.get("last_reset_date")?;

    Ok(Student {
        id: row.get("id")?,
        name: row.get("name")?,
        admission_number: row.get("admission_number")?,
        sections: Vec::new(),
        // an unknown value falls back to the daily default
        status: Status::from_db_str(&status_str).unwrap_or_default(),
        last_reset_date: reset_str
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
    })
}

fn load_sections(conn: &Connection) -> AppResult<HashMap<i64, Vec<String>>> {
    let mut stmt = conn.prepare(
        "SELECT student_id, section FROM student_sections
         ORDER BY student_id ASC, position ASC, section ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut out: HashMap<i64, Vec<String>> = HashMap::new();
    for r in rows {
        let (id, section) = r?;
        out.entry(id).or_default().push(section);
    }
    Ok(out)
}

/// Load the whole roster, ordered by id.
pub fn load_students(conn: &Connection) -> AppResult<Vec<Student>> {
    let mut sections = load_sections(conn)?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map([], map_student_row)?;

    let mut out = Vec::new();
    for r in rows {
        let mut s = r?;
        s.sections = sections.remove(&s.id).unwrap_or_default();
        out.push(s);
    }
    Ok(out)
}

pub fn load_student(conn: &Connection, id: i64) -> AppResult<Option<Student>> {
    let student = conn
        .query_row(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
            [id],
            map_student_row,
        )
        .optional()?;

    let Some(mut student) = student else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT section FROM student_sections
         WHERE student_id = ?1
         ORDER BY position ASC, section ASC",
    )?;
    let rows = stmt.query_map([id], |row| row.get::<_, String>(0))?;
    for r in rows {
        student.sections.push(r?);
    }

    Ok(Some(student))
}

pub fn require_student(conn: &Connection, id: i64) -> AppResult<Student> {
    load_student(conn, id)?.ok_or(AppError::StudentNotFound(id))
}

pub fn student_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM students WHERE id = ?1")?;
    Ok(stmt.exists([id])?)
}

fn write_sections(conn: &Connection, s: &Student) -> AppResult<()> {
    conn.execute("DELETE FROM student_sections WHERE student_id = ?1", [s.id])?;
    for (pos, section) in s.sections.iter().enumerate() {
        conn.execute(
            "INSERT OR IGNORE INTO student_sections (student_id, section, position)
             VALUES (?1, ?2, ?3)",
            params![s.id, section, pos as i64],
        )?;
    }
    Ok(())
}

pub fn insert_student(conn: &Connection, s: &Student) -> AppResult<()> {
    if s.sections.is_empty() {
        return Err(AppError::InvalidSection(format!(
            "student {} ({}) must belong to at least one section",
            s.id, s.name
        )));
    }

    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO students (id, name, admission_number, status, last_reset_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            s.id,
            s.name,
            s.admission_number,
            s.status.to_db_str(),
            s.last_reset_date.map(|d| d.format("%Y-%m-%d").to_string()),
            now,
        ],
    )?;
    write_sections(conn, s)
}

/// Insert or replace a student record. Returns `true` when the id was new.
pub fn upsert_student(conn: &Connection, s: &Student) -> AppResult<bool> {
    if !student_exists(conn, s.id)? {
        insert_student(conn, s)?;
        return Ok(true);
    }

    conn.execute(
        "UPDATE students
         SET name = ?1, admission_number = ?2, status = ?3,
             last_reset_date = ?4, updated_at = ?5
         WHERE id = ?6",
        params![
            s.name,
            s.admission_number,
            s.status.to_db_str(),
            s.last_reset_date.map(|d| d.format("%Y-%m-%d").to_string()),
            Local::now().to_rfc3339(),
            s.id,
        ],
    )?;
    write_sections(conn, s)?;
    Ok(false)
}

pub fn update_student_status(conn: &Connection, id: i64, status: Status) -> AppResult<()> {
    conn.execute(
        "UPDATE students SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.to_db_str(), Local::now().to_rfc3339(), id],
    )?;
    Ok(())
}

/// Default every student not yet reset on `today` to absent.
/// With `force`, every student is reset regardless of the last reset date.
pub fn reset_statuses(conn: &Connection, today: NaiveDate, force: bool) -> AppResult<usize> {
    let today_str = today.format("%Y-%m-%d").to_string();
    let now = Local::now().to_rfc3339();

    let changed = if force {
        conn.execute(
            "UPDATE students SET status = 'absent', last_reset_date = ?1, updated_at = ?2",
            params![today_str, now],
        )?
    } else {
        conn.execute(
            "UPDATE students SET status = 'absent', last_reset_date = ?1, updated_at = ?2
             WHERE last_reset_date IS NULL OR last_reset_date <> ?1",
            params![today_str, now],
        )?
    };
    Ok(changed)
}

/// Append one entry to the attendance log.
/// Returns `false` when an entry with the same id is already stored.
pub fn insert_log_entry(conn: &Connection, e: &AttendanceLogEntry) -> AppResult<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO attendance_log (id, student_id, date, timestamp, status, section)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            e.id,
            e.student_id,
            e.date_str(),
            e.timestamp,
            e.status.to_db_str(),
            e.section,
        ],
    )?;
    Ok(inserted > 0)
}

pub fn last_timestamp_for(conn: &Connection, student_id: i64) -> AppResult<Option<i64>> {
    let ts: Option<i64> = conn.query_row(
        "SELECT MAX(timestamp) FROM attendance_log WHERE student_id = ?1",
        [student_id],
        |row| row.get(0),
    )?;
    Ok(ts)
}

/// Read a log row without trusting it; validation happens afterwards.
fn map_raw_log_row(row: &Row) -> rusqlite::Result<RawLogEntry> {
    Ok(RawLogEntry {
        id: row.get::<_, Option<String>>("id")?.map(RawScalar::Text),
        student_id: row.get::<_, Option<i64>>("student_id")?.map(RawScalar::Int),
        date: row.get("date")?,
        timestamp: row.get::<_, Option<i64>>("timestamp")?.map(RawScalar::Int),
        status: row.get("status")?,
        section: row.get::<_, Option<String>>("section")?.map(RawScalar::Text),
    })
}

fn collect_valid(
    rows: impl Iterator<Item = rusqlite::Result<RawLogEntry>>,
) -> AppResult<Vec<AttendanceLogEntry>> {
    let mut out = Vec::new();
    for r in rows {
        // incomplete rows are skipped, not fatal
        if let Ok(entry) = r?.validate() {
            out.push(entry);
        }
    }
    Ok(out)
}

/// Log entries with `start <= date <= end`, in insertion order.
pub fn load_log_entries(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    section: Option<&str>,
) -> AppResult<Vec<AttendanceLogEntry>> {
    let start_str = start.format("%Y-%m-%d").to_string();
    let end_str = end.format("%Y-%m-%d").to_string();

    match section {
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, student_id, date, timestamp, status, section
                 FROM attendance_log
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map(params![start_str, end_str], map_raw_log_row)?;
            collect_valid(rows)
        }
        Some(section) => {
            let mut stmt = conn.prepare(
                "SELECT id, student_id, date, timestamp, status, section
                 FROM attendance_log
                 WHERE date BETWEEN ?1 AND ?2 AND section = ?3
                 ORDER BY seq ASC",
            )?;
            let rows = stmt.query_map(params![start_str, end_str, section], map_raw_log_row)?;
            collect_valid(rows)
        }
    }
}

/// Every stored log entry, in insertion order.
pub fn load_all_log_entries(conn: &Connection) -> AppResult<Vec<AttendanceLogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, student_id, date, timestamp, status, section
         FROM attendance_log
         ORDER BY seq ASC",
    )?;
    let rows = stmt.query_map([], map_raw_log_row)?;
    collect_valid(rows)
}

/// One student's entries, newest first.
pub fn load_log_for_student(
    conn: &Connection,
    student_id: i64,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<AttendanceLogEntry>> {
    let (start, end) = match bounds {
        Some((s, e)) => (s.format("%Y-%m-%d").to_string(), e.format("%Y-%m-%d").to_string()),
        None => ("0000-01-01".to_string(), "9999-12-31".to_string()),
    };

    let mut stmt = conn.prepare(
        "SELECT id, student_id, date, timestamp, status, section
         FROM attendance_log
         WHERE student_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date DESC, timestamp DESC, seq DESC",
    )?;
    let rows = stmt.query_map(params![student_id, start, end], map_raw_log_row)?;
    collect_valid(rows)
}

pub fn insert_note(conn: &Connection, student_id: i64, text: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO notes (student_id, text, created_at) VALUES (?1, ?2, ?3)",
        params![student_id, text, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_notes(conn: &Connection, student_id: i64) -> AppResult<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT id, student_id, text, created_at FROM notes
         WHERE student_id = ?1
         ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([student_id], |row| {
        Ok(Note {
            id: row.get(0)?,
            student_id: row.get(1)?,
            text: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of students per section label, sorted by label.
pub fn section_counts(conn: &Connection) -> AppResult<Vec<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT section, COUNT(*) FROM student_sections
         GROUP BY section
         ORDER BY section ASC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Smallest id above every stored student.
pub fn next_student_id(conn: &Connection) -> AppResult<i64> {
    let id: i64 = conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM students", [], |row| {
        row.get(0)
    })?;
    Ok(id)
}

/// Data problems `PRAGMA integrity_check` cannot see: students without a
/// section, and log rows that point at no student or lack a field.
pub fn integrity_issues(conn: &Connection) -> AppResult<Vec<String>> {
    let mut issues = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT s.id, s.name FROM students s
         WHERE NOT EXISTS (
             SELECT 1 FROM student_sections ss
             WHERE ss.student_id = s.id AND TRIM(ss.section) <> ''
         )
         ORDER BY s.id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;
    for r in rows {
        let (id, name) = r?;
        issues.push(format!("student {id} ({name}) has no section"));
    }

    let mut stmt = conn.prepare(
        "SELECT l.id, l.student_id FROM attendance_log l
         WHERE l.student_id IS NOT NULL
           AND NOT EXISTS (SELECT 1 FROM students s WHERE s.id = l.student_id)
         ORDER BY l.seq",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;
    for r in rows {
        let (entry, student_id) = r?;
        issues.push(format!("log entry {entry} refers to unknown student {student_id}"));
    }

    let malformed: i64 = conn.query_row(
        "SELECT COUNT(*) FROM attendance_log WHERE student_id IS NULL OR status IS NULL",
        [],
        |row| row.get(0),
    )?;
    if malformed > 0 {
        issues.push(format!(
            "{malformed} log entries without student or status (ignored by reports)"
        ));
    }

    Ok(issues)
}
