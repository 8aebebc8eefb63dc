// src/export/model.rs

use crate::core::reconcile::DailyStatuses;
use crate::core::roster::{RosterEntry, SectionFilter};
use crate::models::Status;
use chrono::NaiveDate;

/// Formato fisso delle intestazioni data.
pub const DATE_LABEL_FORMAT: &str = "%d/%m/%Y";

pub const ROLL_NUMBER_HEADER: &str = "Roll Number";
pub const STUDENT_NAME_HEADER: &str = "Student Name";

pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Una riga del report: uno studente, uno stato per data.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub roll_number: usize,
    pub student_id: i64,
    pub name: String,
    pub admission_number: String,
    /// Parallel to `AttendanceReport::dates`; unmapped students are absent.
    pub statuses: Vec<Status>,
}

impl ReportRow {
    pub fn marks(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.statuses.iter().map(Status::report_mark)
    }
}

/// Roster joined with the reconciled statuses of each date.
/// Shared by CSV, JSON and XLSX.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceReport {
    pub section: String,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<ReportRow>,
}

impl AttendanceReport {
    pub fn build(filter: &SectionFilter, roster: &[RosterEntry], days: &[DailyStatuses]) -> Self {
        let rows = roster
            .iter()
            .map(|entry| ReportRow {
                roll_number: entry.roll_number,
                student_id: entry.student.id,
                name: entry.student.name.clone(),
                admission_number: entry.student.admission_number.clone(),
                statuses: days.iter().map(|d| d.status_of(entry.student.id)).collect(),
            })
            .collect();

        Self {
            section: filter.label().to_string(),
            dates: days.iter().map(|d| d.date).collect(),
            rows,
        }
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            ROLL_NUMBER_HEADER.to_string(),
            STUDENT_NAME_HEADER.to_string(),
        ];
        headers.extend(self.dates.iter().map(|d| date_label(*d)));
        headers
    }

    /// Righe come tabella di stringhe (CSV / XLSX).
    pub fn table(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                let mut cells = vec![r.roll_number.to_string(), r.name.clone()];
                cells.extend(r.marks().map(str::to_string));
                cells
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (present, absent) marks over every cell.
    pub fn mark_counts(&self) -> (usize, usize) {
        self.rows
            .iter()
            .flat_map(|r| r.statuses.iter())
            .fold((0, 0), |(p, a), s| {
                if s.counts_as_present() {
                    (p + 1, a)
                } else {
                    (p, a + 1)
                }
            })
    }
}
