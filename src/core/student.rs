use crate::core::reconcile::reconcile_date;
use crate::core::roster::{RosterEntry, SectionFilter, build_roster};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::student::normalize_sections;
use crate::models::{Status, Student};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// Row of the roster CSV; the first four columns re-import as-is.
#[derive(Serialize)]
struct RosterCsvRow<'a> {
    id: i64,
    name: &'a str,
    admission_number: &'a str,
    section: &'a str,
    sections: String,
}

/// Changes requested by `student edit`. `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct StudentChanges<'a> {
    pub name: Option<&'a str>,
    pub admission: Option<&'a str>,
    pub sections: Option<&'a [String]>,
}

impl StudentChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.admission.is_none() && self.sections.is_none()
    }
}

pub struct StudentLogic;

impl StudentLogic {
    /// Register a new student.
    ///
    /// Without an explicit id a numeric admission number is used, otherwise
    /// the next free id.
    pub fn add(
        pool: &mut DbPool,
        id: Option<i64>,
        name: &str,
        admission: &str,
        sections: &[String],
    ) -> AppResult<Student> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("student name is empty".to_string()));
        }

        let student = pool.with_conn(|conn| {
            let tx = conn.transaction()?;

            let id = match id.or_else(|| admission.trim().parse::<i64>().ok()) {
                Some(id) => id,
                None => queries::next_student_id(&tx)?,
            };

            if queries::student_exists(&tx, id)? {
                return Err(AppError::StudentExists(id));
            }

            let student = Student::new(id, name, admission.trim(), sections.to_vec(), None);
            queries::insert_student(&tx, &student)?;

            tx.commit()?;
            Ok(student)
        })?;

        audit(
            &pool.conn,
            "student_add",
            &student.id.to_string(),
            &format!("{} [{}]", student.name, student.sections_label()),
        );

        Ok(student)
    }

    /// Roster of `filter` with each student's status.
    ///
    /// With `date`, the status is reconciled from that day's log; without,
    /// the stored current status is shown.
    pub fn list(
        pool: &DbPool,
        filter: &SectionFilter,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<(RosterEntry, Status)>> {
        let students = queries::load_students(&pool.conn)?;
        let roster = build_roster(&students, filter);

        let day = match date {
            Some(d) => Some(reconcile_date(
                &queries::load_log_entries(&pool.conn, d, d, None)?,
                d,
            )),
            None => None,
        };

        Ok(roster
            .into_iter()
            .map(|entry| {
                let status = match &day {
                    Some(map) => crate::core::reconcile::status_or_absent(map, entry.student.id),
                    None => entry.student.status,
                };
                (entry, status)
            })
            .collect())
    }

    /// Update name, admission number or sections of an existing student.
    ///
    /// A new section list replaces the old one; the log keeps the section
    /// each entry was written with.
    pub fn edit(pool: &mut DbPool, id: i64, changes: &StudentChanges<'_>) -> AppResult<Student> {
        if changes.is_empty() {
            return Err(AppError::Other(
                "nothing to edit: pass --name, --admission or --section".to_string(),
            ));
        }

        let (student, detail) = pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            let mut student = queries::require_student(&tx, id)?;
            let mut detail = Vec::new();

            if let Some(name) = changes.name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(AppError::Other("student name is empty".to_string()));
                }
                detail.push(format!("name: {} -> {name}", student.name));
                student.name = name.to_string();
            }

            if let Some(admission) = changes.admission {
                let admission = admission.trim();
                detail.push(format!(
                    "admission: {} -> {admission}",
                    student.admission_number
                ));
                student.admission_number = admission.to_string();
            }

            if let Some(sections) = changes.sections {
                let sections = normalize_sections(sections, None);
                if sections.is_empty() {
                    return Err(AppError::InvalidSection(format!(
                        "student {id} must keep at least one section"
                    )));
                }
                detail.push(format!(
                    "sections: [{}] -> [{}]",
                    student.sections_label(),
                    sections.join(", ")
                ));
                student.sections = sections;
            }

            queries::upsert_student(&tx, &student)?;
            tx.commit()?;
            Ok((student, detail.join("; ")))
        })?;

        audit(&pool.conn, "student_edit", &student.id.to_string(), &detail);

        Ok(student)
    }

    /// Write the roster of `filter` to `path`, in report order.
    /// Returns the number of students written.
    pub fn export_csv(pool: &DbPool, filter: &SectionFilter, path: &Path) -> AppResult<usize> {
        let students = queries::load_students(&pool.conn)?;
        let roster = build_roster(&students, filter);

        let mut wtr = csv::Writer::from_path(path)?;

        // serde only emits the header together with the first row
        if roster.is_empty() {
            wtr.write_record(["id", "name", "admission_number", "section", "sections"])?;
        }

        for entry in &roster {
            let s = &entry.student;
            wtr.serialize(RosterCsvRow {
                id: s.id,
                name: &s.name,
                admission_number: &s.admission_number,
                section: s.primary_section(),
                sections: s.sections.join(";"),
            })?;
        }

        wtr.flush()?;
        Ok(roster.len())
    }
}
