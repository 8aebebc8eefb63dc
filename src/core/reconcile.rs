//! Reconstruction of each student's authoritative status from the
//! append-only attendance log.

use crate::models::{AttendanceLogEntry, Status};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Student id → status recorded last on one date.
pub type StatusMap = HashMap<i64, Status>;

/// Statuses of one date, as produced by `reconcile_dates`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStatuses {
    pub date: NaiveDate,
    pub statuses: StatusMap,
}

impl DailyStatuses {
    /// Missing data counts as absence: attendance is opt-in present.
    pub fn status_of(&self, student_id: i64) -> Status {
        status_or_absent(&self.statuses, student_id)
    }
}

pub fn status_or_absent(map: &StatusMap, student_id: i64) -> Status {
    map.get(&student_id).copied().unwrap_or(Status::Absent)
}

/// Fold entries into (timestamp, status) winners per student.
///
/// The highest timestamp wins. On equal timestamps the entry read later
/// wins, so the result depends only on the order the store returned.
fn fold_latest<'a, I>(entries: I) -> StatusMap
where
    I: IntoIterator<Item = &'a AttendanceLogEntry>,
{
    let mut latest: HashMap<i64, (i64, Status)> = HashMap::new();

    for e in entries {
        latest
            .entry(e.student_id)
            .and_modify(|cur| {
                if e.timestamp >= cur.0 {
                    *cur = (e.timestamp, e.status);
                }
            })
            .or_insert((e.timestamp, e.status));
    }

    latest
        .into_iter()
        .map(|(id, (_, status))| (id, status))
        .collect()
}

/// Latest status per student on `date`. Entries of other dates are ignored.
pub fn reconcile_date(entries: &[AttendanceLogEntry], date: NaiveDate) -> StatusMap {
    fold_latest(entries.iter().filter(|e| e.date == date))
}

/// `reconcile_date` for each requested date, in the order given.
pub fn reconcile_dates(entries: &[AttendanceLogEntry], dates: &[NaiveDate]) -> Vec<DailyStatuses> {
    let mut by_date: HashMap<NaiveDate, Vec<&AttendanceLogEntry>> = HashMap::new();
    for e in entries {
        by_date.entry(e.date).or_default().push(e);
    }

    dates
        .iter()
        .map(|d| DailyStatuses {
            date: *d,
            statuses: by_date
                .get(d)
                .map(|day| fold_latest(day.iter().copied()))
                .unwrap_or_default(),
        })
        .collect()
}
