// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse --range (anno / mese / giorno / intervallo).
///
/// Supporta:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
///
/// Restituisce l'intervallo inclusivo `[start, end]`.
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(AppError::InvalidRange(format!(
                    "start and end must have the same format: {r}"
                )));
            }

            (period_bounds(start)?.0, period_bounds(end)?.1)
        }
        None => period_bounds(r)?,
    };

    if start > end {
        return Err(AppError::InvalidRange(format!(
            "start {start} is after end {end}"
        )));
    }

    Ok((start, end))
}

/// First and last day of a YYYY / YYYY-MM / YYYY-MM-DD period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidRange(format!("unsupported --range value '{p}'"));

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((d1, month_last_day(d1).ok_or_else(invalid)?))
        }
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

/// Every day of `[start, end]`, in order. Empty when `start > end`.
pub fn dates_in(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
