// src/export/csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::AttendanceReport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::path::Path;

/// Render the report as CSV text.
///
/// Every field is quoted and embedded quotes are doubled. Rows are joined
/// by `\n` with no newline after the last one.
pub fn render_csv(report: &AttendanceReport) -> AppResult<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(report.headers())?;
    for row in report.table() {
        wtr.write_record(&row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))?;

    if text.ends_with('\n') {
        text.pop();
    }

    Ok(text)
}

pub(crate) fn export_csv(report: &AttendanceReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let text = render_csv(report)?;
    fs::write(path, text)?;

    notify_export_success("CSV", path);
    Ok(())
}
