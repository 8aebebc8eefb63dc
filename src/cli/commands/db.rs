use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::{queries, stats};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            info("Running migrations…");
            run_pending_migrations(&pool.conn)?;
            success("Migrations completed.");
        }

        if *show_info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            check_database(&pool)?;
        }

        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}

/// SQLite page check followed by the roster and log consistency checks.
fn check_database(pool: &DbPool) -> AppResult<()> {
    info("Running integrity check…");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity != "ok" {
        error(format!("SQLite integrity check failed: {integrity}"));
        return Ok(());
    }

    let issues = queries::integrity_issues(&pool.conn)?;
    if issues.is_empty() {
        success("Integrity check passed.");
    } else {
        warning(format!("Found {} data issues:", issues.len()));
        for issue in &issues {
            println!("   - {issue}");
        }
    }

    Ok(())
}
