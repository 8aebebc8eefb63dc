use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reset::ResetLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { force } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let n = ResetLogic::apply(&mut pool, today(), *force)?;

        if n == 0 {
            info("All students already reset today.");
        } else {
            success(format!("{n} students defaulted to absent."));
        }
    }

    Ok(())
}
