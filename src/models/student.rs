use super::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: i64, // ⇔ students.id
    pub name: String, // ⇔ students.name
    pub admission_number: String, // ⇔ students.admission_number
    pub sections: Vec<String>, // ⇔ student_sections (ordered, primary first)
    pub status: Status, // ⇔ students.status
    pub last_reset_date: Option<NaiveDate>, // ⇔ students.last_reset_date
}

impl Student {
    /// Build a student from already validated parts.
    ///
    /// `sections` and the legacy single `section` are merged here, once,
    /// so nothing downstream ever looks at the legacy field.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        admission_number: impl Into<String>,
        sections: Vec<String>,
        legacy_section: Option<&str>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            admission_number: admission_number.into(),
            sections: normalize_sections(sections, legacy_section),
            status: Status::Absent,
            last_reset_date: None,
        }
    }

    /// First section is the one written into new attendance log entries.
    pub fn primary_section(&self) -> &str {
        self.sections.first().map(String::as_str).unwrap_or("")
    }

    pub fn in_section(&self, label: &str) -> bool {
        self.sections.iter().any(|s| s == label)
    }

    pub fn sections_label(&self) -> String {
        self.sections.join(", ")
    }
}

/// Merge the multi-section list with the legacy single-section value.
///
/// Labels are trimmed, blanks dropped, duplicates removed, and the original
/// order kept so the first label stays the primary one. The legacy value is
/// appended last.
pub fn normalize_sections<I, S>(sections: I, legacy: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();

    let legacy = legacy.map(|l| l.to_string());
    let all = sections
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .chain(legacy);

    for label in all {
        let label = label.trim();
        if label.is_empty() || out.iter().any(|s| s == label) {
            continue;
        }
        out.push(label.to_string());
    }

    out
}
