use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Status;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROSTER
    //
    let students: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
    let sections: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT section) FROM student_sections",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Students:{} {}{}{} in {} sections",
        CYAN, RESET, GREEN, students, RESET, sections
    );

    for status in Status::ALL {
        let n: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM students WHERE status = ?1",
            [status.to_db_str()],
            |row| row.get(0),
        )?;
        println!("    {:<9} {}", status.to_db_str(), n);
    }

    //
    // 3) ATTENDANCE LOG
    //
    let entries: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance_log", [], |row| row.get(0))?;
    println!(
        "{}• Attendance log entries:{} {}{}{}",
        CYAN, RESET, GREEN, entries, RESET
    );

    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM attendance_log", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM attendance_log", [], |row| row.get(0))
        .optional()?
        .flatten();

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE ENTRIES/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date)
        && let (Ok(d1), Ok(d2)) = (
            NaiveDate::parse_from_str(&f, "%Y-%m-%d"),
            NaiveDate::parse_from_str(&l, "%Y-%m-%d"),
        )
    {
        let days = (d2 - d1).num_days() + 1;
        let avg = entries as f64 / days as f64;
        println!("{}• Average entries/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
