#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use std::env;
use std::fs;
use std::path::PathBuf;
use stutra::models::{AttendanceLogEntry, Status, Student};

pub fn stutra() -> Command {
    let mut cmd = cargo_bin_cmd!("stutra");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// `stutra --db <db> --test`: isolated from the user's config file.
pub fn stutra_db(db_path: &str) -> Command {
    let mut cmd = stutra();
    cmd.args(["--db", db_path, "--test"]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_stutra.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add a small roster: Alice (1) and Bob (2) in "A",
/// Carol (3) in "B" and "A".
pub fn init_db_with_roster(db_path: &str) {
    stutra_db(db_path).arg("init").assert().success();

    for (id, name, sections) in [
        ("1", "Alice", vec!["A"]),
        ("2", "Bob", vec!["A"]),
        ("3", "Carol", vec!["B", "A"]),
    ] {
        let mut cmd = stutra_db(db_path);
        cmd.args(["student", "add", "--id", id, "--name", name]);
        for s in sections {
            cmd.args(["--section", s]);
        }
        cmd.assert().success();
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn student(id: i64, name: &str, sections: &[&str]) -> Student {
    Student::new(
        id,
        name,
        "",
        sections.iter().map(|s| s.to_string()).collect(),
        None,
    )
}

pub fn entry(student_id: i64, day: &str, timestamp: i64, status: Status) -> AttendanceLogEntry {
    AttendanceLogEntry::new(student_id, date(day), timestamp, status, "A")
}
