mod common;
use common::{date, entry, student};
use stutra::core::roster::SectionFilter;
use stutra::db::SnapshotStore;
use stutra::export::filename::report_file_name;
use stutra::export::range::{dates_in, parse_range};
use stutra::export::{ExportFormat, ExportLogic, render_csv};
use stutra::models::Status;

fn csv_for(store: &SnapshotStore, section: &str, start: &str, end: &str) -> String {
    let report = ExportLogic::build_report(
        store,
        &SectionFilter::parse(Some(section)),
        date(start),
        date(end),
    )
    .expect("build report");
    render_csv(&report).expect("render csv")
}

#[test]
fn test_single_date_round_trip() {
    let store = SnapshotStore::new(
        vec![student(2, "Bob", &["A"]), student(1, "Alice", &["A"])],
        vec![entry(1, "2025-07-27", 1_000, Status::Present)],
    );

    let csv = csv_for(&store, "A", "2025-07-27", "2025-07-27");
    assert_eq!(
        csv,
        "\"Roll Number\",\"Student Name\",\"27/07/2025\"\n\"1\",\"Alice\",\"P\"\n\"2\",\"Bob\",\"A\""
    );
}

#[test]
fn test_non_absent_statuses_count_as_present() {
    let store = SnapshotStore::new(
        vec![
            student(1, "Ann", &["A"]),
            student(2, "Ben", &["A"]),
            student(3, "Cid", &["A"]),
            student(4, "Dot", &["A"]),
        ],
        vec![
            entry(1, "2025-07-27", 1, Status::Washroom),
            entry(2, "2025-07-27", 1, Status::Activity),
            entry(3, "2025-07-27", 1, Status::Bunking),
            entry(4, "2025-07-27", 1, Status::Absent),
        ],
    );

    let csv = csv_for(&store, "all", "2025-07-27", "2025-07-27");
    let cells: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|l| l.rsplit(',').next().unwrap_or_default())
        .collect();
    assert_eq!(cells, vec!["\"P\"", "\"P\"", "\"P\"", "\"A\""]);
}

#[test]
fn test_latest_change_decides_the_cell() {
    let store = SnapshotStore::new(
        vec![student(1, "Alice", &["A"])],
        vec![
            entry(1, "2025-07-27", 100, Status::Present),
            entry(1, "2025-07-27", 200, Status::Absent),
        ],
    );

    let csv = csv_for(&store, "A", "2025-07-27", "2025-07-27");
    assert!(csv.ends_with("\"1\",\"Alice\",\"A\""));
}

#[test]
fn test_multi_date_columns_in_order() {
    let store = SnapshotStore::new(
        vec![student(1, "Alice", &["A"])],
        vec![
            entry(1, "2025-07-27", 1, Status::Present),
            entry(1, "2025-07-29", 1, Status::Present),
        ],
    );

    let csv = csv_for(&store, "A", "2025-07-27", "2025-07-29");
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(
        lines[0],
        "\"Roll Number\",\"Student Name\",\"27/07/2025\",\"28/07/2025\",\"29/07/2025\""
    );
    assert_eq!(lines[1], "\"1\",\"Alice\",\"P\",\"A\",\"P\"");
}

#[test]
fn test_empty_roster_writes_header_only() {
    let store = SnapshotStore::new(
        vec![student(1, "Alice", &["A"])],
        vec![entry(1, "2025-07-27", 1, Status::Present)],
    );

    let csv = csv_for(&store, "Z", "2025-07-27", "2025-07-27");
    assert_eq!(csv, "\"Roll Number\",\"Student Name\",\"27/07/2025\"");
}

#[test]
fn test_embedded_quotes_are_doubled() {
    let store = SnapshotStore::new(vec![student(1, "Ann \"Jo\" Lee", &["A"])], Vec::new());

    let csv = csv_for(&store, "A", "2025-07-27", "2025-07-27");
    assert!(csv.contains("\"Ann \"\"Jo\"\" Lee\""));
    assert!(!csv.ends_with('\n'));
}

#[test]
fn test_secondary_section_member_uses_entries_tagged_with_primary() {
    // Carol's entries carry her primary section "B"
    let mut e = entry(3, "2025-07-27", 1, Status::Present);
    e.section = "B".to_string();

    let store = SnapshotStore::new(vec![student(3, "Carol", &["B", "A"])], vec![e]);

    let csv = csv_for(&store, "A", "2025-07-27", "2025-07-27");
    assert!(csv.ends_with("\"1\",\"Carol\",\"P\""));
}

#[test]
fn test_report_file_name_convention() {
    let d1 = date("2025-07-27");
    let d2 = date("2025-07-31");

    assert_eq!(
        report_file_name("attendance", "Raman", d1, d1, ExportFormat::Csv),
        "attendance_Raman_2025-07-27.csv"
    );
    assert_eq!(
        report_file_name("attendance", "Class 10 B", d1, d2, ExportFormat::Xlsx),
        "attendance_Class_10_B_2025-07-27_to_2025-07-31.xlsx"
    );
}

#[test]
fn test_parse_range_shapes() {
    assert_eq!(
        parse_range("2024-02").expect("month"),
        (date("2024-02-01"), date("2024-02-29"))
    );
    assert_eq!(
        parse_range("2025").expect("year"),
        (date("2025-01-01"), date("2025-12-31"))
    );
    assert_eq!(
        parse_range("2025-07-27:2025-08-02").expect("days"),
        (date("2025-07-27"), date("2025-08-02"))
    );
    assert_eq!(
        parse_range("2025-11:2025-12").expect("months"),
        (date("2025-11-01"), date("2025-12-31"))
    );

    assert!(parse_range("2025-08-02:2025-07-27").is_err());
    assert!(parse_range("2025-07:2025-07-27").is_err());
    assert!(parse_range("yesterday").is_err());

    assert_eq!(dates_in(date("2025-07-30"), date("2025-08-01")).len(), 3);
}
