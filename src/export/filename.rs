// src/export/filename.rs

use crate::export::ExportFormat;
use chrono::NaiveDate;

/// `<reportType>_<section>_<start>[_to_<end>].<ext>`
///
/// `_to_<end>` is only added for multi-day ranges. Whitespace and path
/// separators in the section label become `_`.
pub fn report_file_name(
    report_type: &str,
    section: &str,
    start: NaiveDate,
    end: NaiveDate,
    format: ExportFormat,
) -> String {
    let section: String = section
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect();

    let period = if start == end {
        start.format("%Y-%m-%d").to_string()
    } else {
        format!("{}_to_{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
    };

    format!("{report_type}_{section}_{period}.{}", format.extension())
}
