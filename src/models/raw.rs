//! Loosely typed record shapes as found in JSON snapshots of the hosted
//! document store. Every field is optional; `validate` turns a raw record
//! into the canonical model or explains why it was rejected.

use super::attendance::{AttendanceLogEntry, entry_id};
use super::status::Status;
use super::student::{Student, normalize_sections};
use chrono::NaiveDate;
use serde::Deserialize;

/// A scalar that may have been stored as a number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawScalar::Int(i) => Some(*i),
            RawScalar::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            RawScalar::Float(_) => None,
            RawScalar::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            RawScalar::Int(i) => i.to_string(),
            RawScalar::Float(f) => f.to_string(),
            RawScalar::Text(s) => s.trim().to_string(),
        }
    }
}

/// `sections` was a plain string in some exports and an array in others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawSections {
    One(RawScalar),
    Many(Vec<Option<RawScalar>>),
}

impl RawSections {
    fn into_vec(self) -> Vec<String> {
        match self {
            RawSections::One(s) => vec![s.as_text()],
            RawSections::Many(v) => v.into_iter().flatten().map(|s| s.as_text()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudent {
    #[serde(default)]
    pub id: Option<RawScalar>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "admission_number")]
    pub admission_number: Option<RawScalar>,
    #[serde(default)]
    pub sections: Option<RawSections>,
    #[serde(default)]
    pub section: Option<RawScalar>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "last_reset_date")]
    pub last_reset_date: Option<String>,
}

impl RawStudent {
    /// `key` is the collection key the record was stored under; it is the
    /// id when the record itself carries none.
    pub fn validate(self, key: Option<&str>) -> Result<Student, String> {
        let id = self
            .id
            .as_ref()
            .and_then(RawScalar::as_i64)
            .or_else(|| key.and_then(|k| k.trim().parse().ok()))
            .ok_or_else(|| format!("missing numeric id (key {:?})", key))?;

        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| format!("student {id}: missing name"))?
            .to_string();

        let legacy = self.section.as_ref().map(RawScalar::as_text);
        let sections = normalize_sections(
            self.sections.map(RawSections::into_vec).unwrap_or_default(),
            legacy.as_deref(),
        );
        if sections.is_empty() {
            return Err(format!("student {id} ({name}): no section"));
        }

        let admission = self
            .admission_number
            .as_ref()
            .map(RawScalar::as_text)
            .unwrap_or_default();

        let mut student = Student::new(id, name, admission, sections, None);
        student.status = self
            .status
            .as_deref()
            .and_then(Status::parse)
            .unwrap_or_default();
        student.last_reset_date = self
            .last_reset_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());

        Ok(student)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLogEntry {
    #[serde(default)]
    pub id: Option<RawScalar>,
    #[serde(default, alias = "student_id")]
    pub student_id: Option<RawScalar>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timestamp: Option<RawScalar>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub section: Option<RawScalar>,
}

impl RawLogEntry {
    pub fn validate(self) -> Result<AttendanceLogEntry, String> {
        let id = self
            .id
            .as_ref()
            .map(RawScalar::as_text)
            .filter(|s| !s.is_empty());

        let student_id = self
            .student_id
            .as_ref()
            .and_then(RawScalar::as_i64)
            .ok_or_else(|| format!("log entry {:?}: missing studentId", id))?;

        let status = match self.status.as_deref() {
            Some(s) => Status::parse(s)
                .ok_or_else(|| format!("log entry {:?}: unknown status '{s}'", id))?,
            None => return Err(format!("log entry {:?}: missing status", id)),
        };

        let date = self
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .ok_or_else(|| format!("log entry {:?}: missing or invalid date", id))?;

        let timestamp = self
            .timestamp
            .as_ref()
            .and_then(RawScalar::as_i64)
            .ok_or_else(|| format!("log entry {:?}: missing timestamp", id))?;

        Ok(AttendanceLogEntry {
            id: id.unwrap_or_else(|| entry_id(student_id, timestamp)),
            student_id,
            date,
            timestamp,
            status,
            section: self
                .section
                .as_ref()
                .map(RawScalar::as_text)
                .unwrap_or_default(),
        })
    }
}
