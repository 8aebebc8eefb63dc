mod common;
use common::{date, entry, student, temp_out};
use std::fs;
use std::path::Path;
use stutra::core::reconcile::{DailyStatuses, reconcile_date};
use stutra::core::roster::SectionFilter;
use stutra::core::summary::{summarize, totals, write_summary_csv};
use stutra::models::Status;

fn day_of(entries: &[stutra::models::AttendanceLogEntry]) -> DailyStatuses {
    let d = date("2025-07-27");
    DailyStatuses {
        date: d,
        statuses: reconcile_date(entries, d),
    }
}

#[test]
fn test_summary_counts_per_section() {
    let students = vec![
        student(1, "Alice", &["A"]),
        student(2, "bob", &["A"]),
        student(3, "Carol", &["B", "A"]),
    ];
    let day = day_of(&[
        entry(1, "2025-07-27", 1, Status::Present),
        entry(3, "2025-07-27", 1, Status::Washroom),
    ]);

    let summaries = summarize(&students, &day, &SectionFilter::All);
    assert_eq!(summaries.len(), 2);

    let a = &summaries[0];
    assert_eq!(a.section, "A");
    assert_eq!(a.total, 3);
    assert_eq!(a.present, vec!["Alice", "Carol"]);
    assert_eq!(a.absentees_label(), "bob");
    assert_eq!(a.attendance_rate(), "66.7%");

    let b = &summaries[1];
    assert_eq!(b.section, "B");
    assert_eq!(b.total, 1);
    assert_eq!(b.absentees_label(), "None");
    assert_eq!(b.attendance_rate(), "100.0%");

    // Carol counts in both sections
    assert_eq!(totals(&summaries), (4, 3, 1));
}

#[test]
fn test_summary_section_filter() {
    let students = vec![student(1, "Alice", &["A"]), student(2, "Bob", &["B"])];
    let day = day_of(&[]);

    let summaries = summarize(&students, &day, &SectionFilter::parse(Some("B")));
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].attendance_rate(), "0.0%");
    assert_eq!(summaries[0].absent, vec!["Bob"]);
}

#[test]
fn test_summary_csv_file() {
    let out = temp_out("summary_csv_file", "csv");
    let students = vec![student(1, "Alice", &["A"]), student(2, "Bob", &["A"])];
    let day = day_of(&[entry(1, "2025-07-27", 1, Status::Present)]);

    write_summary_csv(&summarize(&students, &day, &SectionFilter::All), Path::new(&out))
        .expect("write summary");

    let content = fs::read_to_string(&out).expect("read summary");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Section,Total_Strength,Present,Absent,Attendance_Rate,Absentees")
    );
    assert_eq!(lines.next(), Some("A,2,1,1,50.0%,Bob"));
}

#[test]
fn test_empty_summary_csv_has_header() {
    let out = temp_out("summary_csv_empty", "csv");
    write_summary_csv(&[], Path::new(&out)).expect("write summary");

    let content = fs::read_to_string(&out).expect("read summary");
    assert_eq!(
        content.trim_end(),
        "Section,Total_Strength,Present,Absent,Attendance_Rate,Absentees"
    );
}
