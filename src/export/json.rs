// src/export/json.rs

use crate::errors::AppResult;
use crate::export::model::AttendanceReport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    section: &'a str,
    dates: Vec<String>,
    students: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRow<'a> {
    roll_number: usize,
    id: i64,
    name: &'a str,
    admission_number: &'a str,
    /// date → P/A
    attendance: BTreeMap<String, &'static str>,
    /// date → reconciled status
    statuses: BTreeMap<String, &'static str>,
}

/// Scrive il report in JSON formattato.
pub(crate) fn export_json(report: &AttendanceReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let keys: Vec<String> = report
        .dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    let students = report
        .rows
        .iter()
        .map(|r| JsonRow {
            roll_number: r.roll_number,
            id: r.student_id,
            name: &r.name,
            admission_number: &r.admission_number,
            attendance: keys.iter().cloned().zip(r.marks()).collect(),
            statuses: keys
                .iter()
                .cloned()
                .zip(r.statuses.iter().map(|s| s.to_db_str()))
                .collect(),
        })
        .collect();

    let doc = JsonReport {
        section: &report.section,
        dates: keys.clone(),
        students,
    };

    std::fs::write(path, serde_json::to_string_pretty(&doc)?)?;

    notify_export_success("JSON", path);
    Ok(())
}
