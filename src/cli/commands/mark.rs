use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::mark::MarkLogic;
use crate::core::reset::ResetLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success};
use crate::utils::colors::colorize_status;
use crate::utils::date::{date_or_today, now_ms, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark { ids, status, date } = cmd {
        let today = today();
        let date = date_or_today(date.as_deref())?;

        let mut pool = DbPool::new(&cfg.database)?;

        if cfg.auto_reset {
            let n = ResetLogic::apply(&mut pool, today, false)?;
            if n > 0 {
                info(format!("Daily reset: {n} students defaulted to absent."));
            }
        }

        let mut first_error: Option<AppError> = None;

        for id in ids {
            match MarkLogic::apply(&mut pool, *id, *status, date, today, now_ms()) {
                Ok(entry) => success(format!(
                    "Student {} marked {} on {}",
                    id,
                    colorize_status(entry.status),
                    entry.date_str()
                )),
                Err(e) => {
                    error(format!("Student {id}: {e}"));
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
    }

    Ok(())
}
