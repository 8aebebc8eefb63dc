mod common;
use common::{date, entry};
use stutra::core::reconcile::{reconcile_date, reconcile_dates};
use stutra::models::Status;

#[test]
fn test_latest_timestamp_wins() {
    let entries = vec![
        entry(1, "2025-07-27", 100, Status::Present),
        entry(1, "2025-07-27", 300, Status::Bunking),
        entry(1, "2025-07-27", 200, Status::Absent),
    ];

    let map = reconcile_date(&entries, date("2025-07-27"));
    assert_eq!(map.get(&1), Some(&Status::Bunking));
}

#[test]
fn test_reconcile_is_idempotent() {
    let entries = vec![
        entry(1, "2025-07-27", 100, Status::Present),
        entry(2, "2025-07-27", 110, Status::Washroom),
        entry(1, "2025-07-27", 120, Status::Absent),
    ];

    let first = reconcile_date(&entries, date("2025-07-27"));
    let second = reconcile_date(&entries, date("2025-07-27"));
    assert_eq!(first, second);
}

#[test]
fn test_other_dates_are_ignored() {
    let entries = vec![
        entry(1, "2025-07-26", 900, Status::Present),
        entry(1, "2025-07-27", 100, Status::Absent),
    ];

    let map = reconcile_date(&entries, date("2025-07-27"));
    assert_eq!(map.get(&1), Some(&Status::Absent));

    let empty = reconcile_date(&entries, date("2025-07-28"));
    assert!(empty.is_empty());
}

#[test]
fn test_multi_change_same_day() {
    // present → washroom → present: the day counts as present
    let entries = vec![
        entry(7, "2025-07-27", 1_000, Status::Present),
        entry(7, "2025-07-27", 2_000, Status::Washroom),
        entry(7, "2025-07-27", 3_000, Status::Present),
    ];

    let map = reconcile_date(&entries, date("2025-07-27"));
    assert_eq!(map.get(&7), Some(&Status::Present));
}

#[test]
fn test_equal_timestamps_later_entry_wins() {
    let entries = vec![
        entry(1, "2025-07-27", 500, Status::Present),
        entry(1, "2025-07-27", 500, Status::Activity),
    ];
    let map = reconcile_date(&entries, date("2025-07-27"));
    assert_eq!(map.get(&1), Some(&Status::Activity));

    let reversed: Vec<_> = entries.into_iter().rev().collect();
    let map = reconcile_date(&reversed, date("2025-07-27"));
    assert_eq!(map.get(&1), Some(&Status::Present));
}

#[test]
fn test_empty_input_gives_empty_map() {
    assert!(reconcile_date(&[], date("2025-07-27")).is_empty());
}

#[test]
fn test_reconcile_dates_keeps_requested_order_and_defaults_absent() {
    let entries = vec![
        entry(1, "2025-07-27", 100, Status::Present),
        entry(1, "2025-07-28", 100, Status::Absent),
        entry(1, "2025-07-29", 100, Status::Activity),
    ];

    let dates = [date("2025-07-29"), date("2025-07-27"), date("2025-07-30")];
    let days = reconcile_dates(&entries, &dates);

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, date("2025-07-29"));
    assert_eq!(days[0].status_of(1), Status::Activity);
    assert_eq!(days[1].status_of(1), Status::Present);
    // no entries on the 30th and none at all for student 2
    assert_eq!(days[2].status_of(1), Status::Absent);
    assert_eq!(days[1].status_of(2), Status::Absent);
}
