//! In-memory store built from a JSON snapshot of the hosted database
//! (`{"students": ..., "attendanceLogs": ...}`), or from plain vectors.

use crate::db::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::models::raw::{RawLogEntry, RawScalar, RawStudent};
use crate::models::{AttendanceLogEntry, Student};
use chrono::NaiveDate;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::Path;

const LOG_KEYS: [&str; 3] = ["attendanceLogs", "attendance_logs", "attendanceLog"];

#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    students: Vec<Student>,
    entries: Vec<AttendanceLogEntry>,
    rejected: Vec<String>,
}

/// Collections were exported either as objects keyed by id or as arrays
/// indexed by id with `null` holes.
fn records(v: Option<&Value>) -> Vec<(Option<String>, &Value, bool)> {
    match v {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| (Some(k.clone()), v, true))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (Some(i.to_string()), v, false))
            .collect(),
        _ => Vec::new(),
    }
}

impl SnapshotStore {
    pub fn new(students: Vec<Student>, entries: Vec<AttendanceLogEntry>) -> Self {
        Self {
            students,
            entries,
            rejected: Vec::new(),
        }
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Import(format!("cannot read snapshot {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> AppResult<Self> {
        let root: Value = serde_json::from_str(content)?;
        if !root.is_object() {
            return Err(AppError::Import(
                "snapshot root must be a JSON object".to_string(),
            ));
        }

        let mut store = SnapshotStore::default();

        for (key, value, _) in records(root.get("students")) {
            let parsed = serde_json::from_value::<RawStudent>(value.clone())
                .map_err(|e| format!("student {:?}: {e}", key))
                .and_then(|raw| raw.validate(key.as_deref()));

            match parsed {
                Ok(s) => store.students.push(s),
                Err(reason) => store.rejected.push(reason),
            }
        }

        let logs = LOG_KEYS.iter().find_map(|k| root.get(*k));
        for (key, value, keyed) in records(logs) {
            let parsed = serde_json::from_value::<RawLogEntry>(value.clone())
                .map_err(|e| format!("log entry {:?}: {e}", key))
                .and_then(|mut raw| {
                    if raw.id.is_none() && keyed {
                        raw.id = key.clone().map(RawScalar::Text);
                    }
                    raw.validate()
                });

            match parsed {
                Ok(e) => store.entries.push(e),
                Err(reason) => store.rejected.push(reason),
            }
        }

        Ok(store)
    }

    /// Records that failed validation, one reason each.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    pub fn all_students(&self) -> &[Student] {
        &self.students
    }

    pub fn all_entries(&self) -> &[AttendanceLogEntry] {
        &self.entries
    }

    /// Serialize in the same shape `from_json_str` reads.
    pub fn to_json(students: &[Student], entries: &[AttendanceLogEntry]) -> Value {
        let mut st = Map::new();
        for s in students {
            st.insert(
                s.id.to_string(),
                json!({
                    "id": s.id,
                    "name": s.name,
                    "admissionNumber": s.admission_number,
                    "sections": s.sections,
                    "status": s.status.to_db_str(),
                    "lastResetDate": s.last_reset_date.map(|d| d.format("%Y-%m-%d").to_string()),
                }),
            );
        }

        let mut logs = Map::new();
        for e in entries {
            logs.insert(
                e.id.clone(),
                json!({
                    "id": e.id,
                    "studentId": e.student_id,
                    "date": e.date_str(),
                    "timestamp": e.timestamp,
                    "status": e.status.to_db_str(),
                    "section": e.section,
                }),
            );
        }

        json!({ "students": st, "attendanceLogs": logs })
    }
}

impl AttendanceStore for SnapshotStore {
    fn students(&self) -> AppResult<Vec<Student>> {
        Ok(self.students.clone())
    }

    fn log_entries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        section: Option<&str>,
    ) -> AppResult<Vec<AttendanceLogEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .filter(|e| section.is_none_or(|s| e.section == s))
            .cloned()
            .collect())
    }
}
