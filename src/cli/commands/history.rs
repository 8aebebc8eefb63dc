use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_status;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { id, range } = cmd {
        let bounds = match range.as_deref() {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let pool = DbPool::new(&cfg.database)?;
        let student = queries::require_student(&pool.conn, *id)?;
        let entries = queries::load_log_for_student(&pool.conn, *id, bounds)?;

        if entries.is_empty() {
            info(format!("No attendance entries for {} (ID: {id}).", student.name));
            return Ok(());
        }

        header(format!("{} (ID: {}) [{}]", student.name, id, student.sections_label()));

        let mut table = Table::with_headers(&["Date", "Recorded at", "Status", "Section"]);
        for e in &entries {
            table.add_row(vec![
                e.date_str(),
                e.recorded_at(),
                colorize_status(e.status),
                e.section.clone(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
