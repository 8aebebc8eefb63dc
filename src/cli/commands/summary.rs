use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::{DailyStatuses, reconcile_date};
use crate::core::roster::SectionFilter;
use crate::core::summary::{summarize, totals, write_summary_csv};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::date::date_or_today;
use crate::utils::table::Table;
use std::path::Path;

const ABSENTEES_WIDTH: usize = 48;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary {
        date,
        section,
        file,
        force,
    } = cmd
    {
        let date = date_or_today(date.as_deref())?;
        let filter =
            SectionFilter::parse(Some(section.as_deref().unwrap_or(&cfg.default_section)));

        let pool = DbPool::new(&cfg.database)?;
        let students = queries::load_students(&pool.conn)?;
        let entries = queries::load_log_entries(&pool.conn, date, date, None)?;

        let day = DailyStatuses {
            date,
            statuses: reconcile_date(&entries, date),
        };
        let summaries = summarize(&students, &day, &filter);

        if summaries.is_empty() {
            info(format!("No students in section '{}'.", filter.label()));
        } else {
            header(format!("Attendance summary for {}", date.format("%Y-%m-%d")));

            let mut table = Table::with_headers(&[
                "Section", "Total", "Present", "Absent", "Rate", "Absentees",
            ]);

            for s in &summaries {
                // long absentee lists continue on extra rows
                let label = s.absentees_label();
                let wrapped = textwrap::wrap(&label, ABSENTEES_WIDTH);
                for (i, line) in wrapped.iter().enumerate() {
                    if i == 0 {
                        table.add_row(vec![
                            s.section.clone(),
                            s.total.to_string(),
                            s.present.len().to_string(),
                            s.absent.len().to_string(),
                            s.attendance_rate(),
                            colorize_optional(line),
                        ]);
                    } else {
                        table.add_row(vec![
                            String::new(),
                            String::new(),
                            String::new(),
                            String::new(),
                            String::new(),
                            line.to_string(),
                        ]);
                    }
                }
            }
            print!("{}", table.render());

            let (t, p, a) = totals(&summaries);
            println!("\nTotal: {t}  Present: {p}  Absent: {a}");
        }

        if let Some(f) = file {
            let path = Path::new(f);
            ensure_writable(path, *force)?;
            write_summary_csv(&summaries, path)?;
            success(format!("Summary written: {}", path.display()));
        }
    }

    Ok(())
}
