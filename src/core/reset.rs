use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use chrono::NaiveDate;

pub struct ResetLogic;

impl ResetLogic {
    /// Apply the daily default-to-absent.
    ///
    /// Students already reset on `today` are left alone unless `force` is
    /// set. No log entries are written: a day without entries already
    /// reads as absent. Returns the number of students reset.
    pub fn apply(pool: &mut DbPool, today: NaiveDate, force: bool) -> AppResult<usize> {
        let changed = queries::reset_statuses(&pool.conn, today, force)?;

        if changed > 0 {
            audit(
                &pool.conn,
                "reset",
                &today.format("%Y-%m-%d").to_string(),
                &format!("{changed} students defaulted to absent"),
            );
        }

        Ok(changed)
    }
}
