// src/export/logic.rs

use crate::core::reconcile::reconcile_dates;
use crate::core::roster::{SectionFilter, build_roster};
use crate::db::store::AttendanceStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv::export_csv;
use crate::export::filename::report_file_name;
use crate::export::fs_utils::{ensure_writable, resolve_output_path};
use crate::export::json::export_json;
use crate::export::model::AttendanceReport;
use crate::export::range::dates_in;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Parametri di un export.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub section: SectionFilter,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: ExportFormat,
    /// Path assoluto esplicito (`--file`).
    pub file: Option<&'a str>,
    /// Directory per il nome convenzionale, se `file` manca.
    pub out_dir: Option<&'a str>,
    pub report_type: &'a str,
    pub force: bool,
}

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Read one snapshot of `store` and build the report for `section`
    /// over `[start, end]`.
    ///
    /// The log is read without a section filter: the roster decides who is
    /// in the report, since entries only carry the student's primary section.
    pub fn build_report<S>(
        store: &S,
        section: &SectionFilter,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<AttendanceReport>
    where
        S: AttendanceStore + ?Sized,
    {
        if start > end {
            return Err(AppError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }

        let students = store.students()?;
        let entries = store.log_entries(start, end, None)?;

        let roster = build_roster(&students, section);
        let days = reconcile_dates(&entries, &dates_in(start, end));

        Ok(AttendanceReport::build(section, &roster, &days))
    }

    /// Build the report and write it in the requested format.
    ///
    /// The store is read completely before the output file is touched, so a
    /// failed read leaves no partial file behind.
    pub fn export<S>(store: &S, req: &ExportRequest<'_>) -> AppResult<PathBuf>
    where
        S: AttendanceStore + ?Sized,
    {
        let report = Self::build_report(store, &req.section, req.start, req.end)?;

        let default_name = report_file_name(
            req.report_type,
            req.section.label(),
            req.start,
            req.end,
            req.format,
        );
        let path = resolve_output_path(req.file, req.out_dir, &default_name)?;

        ensure_writable(&path, req.force)?;

        if report.is_empty() {
            warning(format!(
                "No students in section '{}': writing header only.",
                report.section
            ));
        }

        match req.format {
            ExportFormat::Csv => export_csv(&report, &path)?,
            ExportFormat::Json => export_json(&report, &path)?,
            ExportFormat::Xlsx => export_xlsx(&report, &path)?,
        }

        let (present, absent) = report.mark_counts();
        info(format!(
            "{} students × {} days: {present} P, {absent} A",
            report.rows.len(),
            report.dates.len()
        ));

        Ok(path)
    }
}
