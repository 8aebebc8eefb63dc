mod common;
use common::{date, setup_test_db};
use rusqlite::Connection;
use stutra::core::mark::MarkLogic;
use stutra::core::reset::ResetLogic;
use stutra::db::{AttendanceStore, DbPool, queries};
use stutra::errors::AppError;
use stutra::models::Status;

#[test]
fn test_legacy_single_section_column_is_migrated() {
    let db_path = setup_test_db("legacy_single_section");

    {
        let conn = Connection::open(&db_path).expect("open legacy db");
        conn.execute_batch(
            "CREATE TABLE students (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                admission_number TEXT NOT NULL DEFAULT '',
                section TEXT,
                status TEXT NOT NULL DEFAULT 'absent',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            INSERT INTO students (id, name, section, created_at, updated_at)
            VALUES (1, 'Alice', ' Raman ', 'x', 'x'), (2, 'Bob', 'Tagore', 'x', 'x');",
        )
        .expect("create legacy schema");
    }

    let pool = DbPool::new(&db_path).expect("open and migrate");
    let students = pool.students().expect("load students");

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].sections, vec!["Raman"]);
    assert_eq!(students[1].sections, vec!["Tagore"]);
    assert_eq!(students[0].last_reset_date, None);

    // a second open is a no-op
    drop(pool);
    let pool = DbPool::new(&db_path).expect("reopen");
    assert_eq!(pool.students().expect("load students")[0].sections, vec!["Raman"]);
}

#[test]
fn test_mark_bumps_equal_timestamps_and_keeps_backfill_out_of_current_status() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    let alice = stutra::models::Student::new(1, "Alice", "", vec!["B".into(), "A".into()], None);
    queries::insert_student(&pool.conn, &alice).expect("insert");

    let today = date("2025-07-28");

    let first = MarkLogic::apply(&mut pool, 1, Status::Present, today, today, 1_000)
        .expect("first mark");
    let second = MarkLogic::apply(&mut pool, 1, Status::Washroom, today, today, 1_000)
        .expect("second mark");

    assert_eq!(first.id, "1_1000");
    assert_eq!(second.timestamp, 1_001);
    assert_eq!(second.section, "B");

    let stored = queries::require_student(&pool.conn, 1).expect("student");
    assert_eq!(stored.status, Status::Washroom);

    // back-filled day: log only
    MarkLogic::apply(&mut pool, 1, Status::Absent, date("2025-07-20"), today, 2_000)
        .expect("backfill");
    let stored = queries::require_student(&pool.conn, 1).expect("student");
    assert_eq!(stored.status, Status::Washroom);

    let err = MarkLogic::apply(&mut pool, 9, Status::Present, today, today, 3_000)
        .expect_err("unknown student");
    assert!(matches!(err, AppError::StudentNotFound(9)));
}

#[test]
fn test_daily_reset_runs_once_per_day() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    for (id, name) in [(1, "Alice"), (2, "Bob")] {
        let s = stutra::models::Student::new(id, name, "", vec!["A".into()], None);
        queries::insert_student(&pool.conn, &s).expect("insert");
        queries::update_student_status(&pool.conn, id, Status::Present).expect("status");
    }

    let today = date("2025-07-28");
    assert_eq!(ResetLogic::apply(&mut pool, today, false).expect("reset"), 2);
    assert_eq!(ResetLogic::apply(&mut pool, today, false).expect("reset"), 0);
    assert_eq!(ResetLogic::apply(&mut pool, today, true).expect("forced"), 2);

    let students = pool.students().expect("students");
    assert!(students.iter().all(|s| s.status == Status::Absent));
    assert!(students.iter().all(|s| s.last_reset_date == Some(today)));

    // resets are not attendance changes
    let entries = pool
        .log_entries(today, today, None)
        .expect("entries");
    assert!(entries.is_empty());
}
