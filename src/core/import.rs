use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::db::snapshot::SnapshotStore;
use crate::errors::{AppError, AppResult};
use crate::models::Student;
use crate::ui::messages::warning;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// One row of a roster sheet. Both the per-section export
/// (`S.NO,A.NO.,Name`) and the flat layout
/// (`name,admission_number,section`) deserialize into it.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default, rename = "admission_number", alias = "A.NO.")]
    admission: Option<String>,
    #[serde(default, rename = "name", alias = "Name")]
    name: Option<String>,
    #[serde(default, rename = "section", alias = "Section")]
    section: Option<String>,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub students_added: usize,
    pub students_updated: usize,
    pub entries_added: usize,
    pub entries_existing: usize,
    pub skipped: Vec<String>,
}

/// "ADITI  sharma" → "Aditi Sharma"
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Section label derived from a roster file name: digits dropped,
/// separators turned into spaces, title-cased ("raman2.csv" → "Raman").
pub fn section_from_file_stem(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy().to_string();
    let re = Regex::new(r"[0-9]+").ok()?;
    let cleaned = re.replace_all(&stem, "").replace(['_', '-'], " ");
    let label = title_case(cleaned.trim());
    if label.is_empty() { None } else { Some(label) }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Import a roster sheet. The admission number becomes the student id.
    ///
    /// Rows without a name or with a non-numeric admission number are
    /// skipped, as are ids already present in the database.
    pub fn import_roster_csv(
        pool: &mut DbPool,
        path: &Path,
        section: Option<&str>,
    ) -> AppResult<ImportReport> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| AppError::Import(format!("cannot open {}: {e}", path.display())))?;

        let fallback_section = section
            .map(str::to_string)
            .or_else(|| section_from_file_stem(path));

        let mut report = ImportReport::default();
        let mut students: Vec<Student> = Vec::new();

        for (i, row) in rdr.deserialize::<RosterRow>().enumerate() {
            let line = i + 2;
            let row = match row {
                Ok(r) => r,
                Err(e) => {
                    report.skipped.push(format!("row {line}: {e}"));
                    continue;
                }
            };

            let name = row.name.as_deref().map(str::trim).unwrap_or_default();
            let admission = row.admission.as_deref().map(str::trim).unwrap_or_default();
            if name.is_empty() || admission.is_empty() {
                report.skipped.push(format!("row {line}: missing name or admission number"));
                continue;
            }

            let Ok(id) = admission.parse::<i64>() else {
                report
                    .skipped
                    .push(format!("row {line}: invalid admission number '{admission}'"));
                continue;
            };

            let row_section = row
                .section
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            let Some(label) = row_section.or_else(|| fallback_section.clone()) else {
                report.skipped.push(format!("row {line}: no section for {name}"));
                continue;
            };

            students.push(Student::new(id, title_case(name), admission, vec![label], None));
        }

        pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            for s in &students {
                if queries::student_exists(&tx, s.id)? {
                    report
                        .skipped
                        .push(format!("{} (ID: {}) already exists", s.name, s.id));
                    continue;
                }
                queries::insert_student(&tx, s)?;
                report.students_added += 1;
            }
            tx.commit()?;
            Ok(())
        })?;

        audit(
            &pool.conn,
            "import",
            &path.to_string_lossy(),
            &format!(
                "Roster import: {} added, {} skipped",
                report.students_added,
                report.skipped.len()
            ),
        );

        Ok(report)
    }

    /// Load a JSON snapshot: students are upserted, log entries appended
    /// unless an entry with the same id is already stored.
    pub fn import_snapshot(pool: &mut DbPool, path: &Path) -> AppResult<ImportReport> {
        let snapshot = SnapshotStore::from_path(path)?;

        let mut report = ImportReport {
            skipped: snapshot.rejected().to_vec(),
            ..Default::default()
        };

        pool.with_conn(|conn| {
            let tx = conn.transaction()?;

            for s in snapshot.all_students() {
                if queries::upsert_student(&tx, s)? {
                    report.students_added += 1;
                } else {
                    report.students_updated += 1;
                }
            }

            for e in snapshot.all_entries() {
                if queries::insert_log_entry(&tx, e)? {
                    report.entries_added += 1;
                } else {
                    report.entries_existing += 1;
                }
            }

            tx.commit()?;
            Ok(())
        })?;

        if !report.skipped.is_empty() {
            warning(format!(
                "{} malformed records were skipped",
                report.skipped.len()
            ));
        }

        audit(
            &pool.conn,
            "import",
            &path.to_string_lossy(),
            &format!(
                "Snapshot import: {} students added, {} updated, {} log entries added",
                report.students_added, report.students_updated, report.entries_added
            ),
        );

        Ok(report)
    }
}
