use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::{ImportLogic, ImportReport};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::path::Path;

fn print_report(report: &ImportReport) {
    success(format!(
        "Import completed: {} students added, {} updated, {} log entries added ({} already present)",
        report.students_added,
        report.students_updated,
        report.entries_added,
        report.entries_existing
    ));

    for s in &report.skipped {
        warning(format!("Skipped: {s}"));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import {
        csv,
        section,
        backup,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let report = match (csv, backup) {
            (Some(file), _) => {
                ImportLogic::import_roster_csv(&mut pool, Path::new(file), section.as_deref())?
            }
            (None, Some(file)) => ImportLogic::import_snapshot(&mut pool, Path::new(file))?,
            (None, None) => return Ok(()),
        };

        print_report(&report);
    }

    Ok(())
}
