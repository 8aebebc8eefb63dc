// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::AttendanceReport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const PRESENT_FILL: u32 = 0xC6EFCE;
const ABSENT_FILL: u32 = 0xFFC7CE;

/// Export XLSX: intestazione bloccata, celle P/A colorate, larghezze automatiche.
pub(crate) fn export_xlsx(report: &AttendanceReport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(&report.section))
        .map_err(to_app_error)?;

    let headers = report.headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 2).map_err(to_app_error)?;

    let mut col_widths: Vec<usize> = headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, r) in report.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        let roll_fmt = cell_format(band).set_align(FormatAlign::Right);
        worksheet
            .write_with_format(row, 0, r.roll_number as f64, &roll_fmt)
            .map_err(to_app_error)?;
        col_widths[0] = col_widths[0].max(r.roll_number.to_string().len());

        worksheet
            .write_with_format(row, 1, r.name.as_str(), &cell_format(band))
            .map_err(to_app_error)?;
        col_widths[1] = col_widths[1].max(UnicodeWidthStr::width(r.name.as_str()));

        for (i, status) in r.statuses.iter().enumerate() {
            let fill = if status.counts_as_present() {
                PRESENT_FILL
            } else {
                ABSENT_FILL
            };
            write_mark(worksheet, row, (i + 2) as u16, status.report_mark(), fill)?;
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    let label = if report.is_empty() {
        "XLSX (empty roster)"
    } else {
        "XLSX"
    };
    notify_export_success(label, path);
    Ok(())
}

fn cell_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_mark(worksheet: &mut Worksheet, row: u32, col: u16, mark: &str, fill: u32) -> AppResult<()> {
    let fmt = cell_format(Color::RGB(fill)).set_align(FormatAlign::Center);
    worksheet
        .write_with_format(row, col, mark, &fmt)
        .map_err(to_app_error)?;
    Ok(())
}

/// Excel sheet names: max 31 chars, no `[]:*?/\`.
fn sheet_name(section: &str) -> String {
    let cleaned: String = section
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Attendance".to_string()
    } else {
        cleaned
    }
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
