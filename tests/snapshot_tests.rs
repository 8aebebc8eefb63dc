mod common;
use common::date;
use stutra::db::{AttendanceStore, SnapshotStore};
use stutra::models::Status;

const SNAPSHOT: &str = r#"{
  "students": {
    "1": { "name": "Alice", "admissionNumber": 1001, "sections": ["A"], "status": "present" },
    "2": { "name": "Bob", "admission_number": "1002", "section": "A" },
    "3": { "id": "3", "name": "Carol", "sections": "B", "section": "A" },
    "4": { "name": "", "sections": ["A"] },
    "5": { "name": "Nobody" }
  },
  "attendanceLogs": {
    "1_100": { "studentId": 1, "date": "2025-07-27", "timestamp": 100, "status": "present", "section": "A" },
    "2_200": { "studentId": "2", "date": "2025-07-27", "timestamp": 200, "status": "bunking", "section": "A" },
    "3_300": { "studentId": 3, "date": "2025-07-28", "timestamp": 300, "status": "present", "section": "B" },
    "bad1": { "studentId": 1, "date": "27/07/2025", "timestamp": 1, "status": "present" },
    "bad2": { "studentId": 1, "date": "2025-07-27", "timestamp": 1, "status": "sleeping" },
    "bad3": { "date": "2025-07-27", "timestamp": 1, "status": "present" }
  }
}"#;

#[test]
fn test_snapshot_validation_skips_malformed_records() {
    let store = SnapshotStore::from_json_str(SNAPSHOT).expect("parse snapshot");

    assert_eq!(store.all_students().len(), 3);
    assert_eq!(store.all_entries().len(), 3);
    // two students and three log entries rejected
    assert_eq!(store.rejected().len(), 5);
}

#[test]
fn test_snapshot_normalizes_sections_and_fields() {
    let store = SnapshotStore::from_json_str(SNAPSHOT).expect("parse snapshot");
    let students = store.students().expect("students");

    let alice = students.iter().find(|s| s.id == 1).expect("alice");
    assert_eq!(alice.admission_number, "1001");
    assert_eq!(alice.status, Status::Present);

    let bob = students.iter().find(|s| s.id == 2).expect("bob");
    assert_eq!(bob.sections, vec!["A"]);
    assert_eq!(bob.admission_number, "1002");
    assert_eq!(bob.status, Status::Absent);

    let carol = students.iter().find(|s| s.id == 3).expect("carol");
    assert_eq!(carol.sections, vec!["B", "A"]);
    assert_eq!(carol.primary_section(), "B");
}

#[test]
fn test_snapshot_store_read_is_bounded() {
    let store = SnapshotStore::from_json_str(SNAPSHOT).expect("parse snapshot");

    let day = store
        .log_entries(date("2025-07-27"), date("2025-07-27"), None)
        .expect("entries");
    assert_eq!(day.len(), 2);

    let only_b = store
        .log_entries(date("2025-07-01"), date("2025-07-31"), Some("B"))
        .expect("entries");
    assert_eq!(only_b.len(), 1);
    assert_eq!(only_b[0].student_id, 3);
    assert_eq!(only_b[0].id, "3_300");
}

#[test]
fn test_snapshot_arrays_with_holes() {
    let json = r#"{
      "students": [null, { "name": "Alice", "sections": ["A"] }],
      "attendance_logs": [{ "studentId": 1, "date": "2025-07-27", "timestamp": 5, "status": "washroom" }]
    }"#;

    let store = SnapshotStore::from_json_str(json).expect("parse snapshot");
    assert_eq!(store.all_students()[0].id, 1);
    assert_eq!(store.all_entries()[0].id, "1_5");
    assert_eq!(store.all_entries()[0].status, Status::Washroom);
}

#[test]
fn test_snapshot_root_must_be_object() {
    assert!(SnapshotStore::from_json_str("[1, 2]").is_err());
    assert!(SnapshotStore::from_json_str("not json").is_err());
}

#[test]
fn test_snapshot_numeric_log_id_keeps_entry() {
    let json = r#"{
      "students": { "1": { "name": "Alice", "sections": ["A"] } },
      "attendanceLogs": [{ "id": 7, "studentId": 1, "date": "2025-07-27", "timestamp": 5, "status": "present", "section": 10 }]
    }"#;

    let store = SnapshotStore::from_json_str(json).expect("parse snapshot");
    assert!(store.rejected().is_empty(), "{:?}", store.rejected());
    assert_eq!(store.all_entries().len(), 1);
    assert_eq!(store.all_entries()[0].id, "7");
    assert_eq!(store.all_entries()[0].section, "10");
}

#[test]
fn test_snapshot_numeric_section_labels_keep_student() {
    let json = r#"{
      "students": {
        "1": { "name": "Alice", "sections": [10, "A"] },
        "2": { "name": "Bob", "sections": 11, "section": 10 }
      },
      "attendanceLogs": {}
    }"#;

    let store = SnapshotStore::from_json_str(json).expect("parse snapshot");
    assert!(store.rejected().is_empty(), "{:?}", store.rejected());

    let students = store.students().expect("students");
    let alice = students.iter().find(|s| s.id == 1).expect("alice");
    assert_eq!(alice.sections, vec!["10", "A"]);
    let bob = students.iter().find(|s| s.id == 2).expect("bob");
    assert_eq!(bob.sections, vec!["11", "10"]);
}

#[test]
fn test_snapshot_entry_with_numeric_id_reconciles_present() {
    use stutra::core::roster::SectionFilter;
    use stutra::export::ExportLogic;

    let json = r#"{
      "students": { "1": { "name": "Alice", "sections": [10] } },
      "attendanceLogs": [{ "id": 7, "studentId": 1, "date": "2025-07-27", "timestamp": 5, "status": "present" }]
    }"#;

    let store = SnapshotStore::from_json_str(json).expect("parse snapshot");
    let report = ExportLogic::build_report(
        &store,
        &SectionFilter::parse(Some("10")),
        date("2025-07-27"),
        date("2025-07-27"),
    )
    .expect("report");

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].statuses, vec![Status::Present]);
}
