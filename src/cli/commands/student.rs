use crate::cli::parser::{Commands, StudentAction};
use crate::config::Config;
use crate::core::reset::ResetLogic;
use crate::core::roster::SectionFilter;
use crate::core::student::{StudentChanges, StudentLogic};
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_status;
use crate::utils::date::{parse_date, today};
use crate::utils::table::Table;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Student { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        StudentAction::Add {
            name,
            admission,
            sections,
            id,
        } => {
            let s = StudentLogic::add(&mut pool, *id, name, admission, sections)?;
            success(format!(
                "Student added: {} (ID: {}) [{}]",
                s.name,
                s.id,
                s.sections_label()
            ));
        }

        StudentAction::List { section, date } => {
            if cfg.auto_reset {
                ResetLogic::apply(&mut pool, today(), false)?;
            }

            let filter =
                SectionFilter::parse(Some(section.as_deref().unwrap_or(&cfg.default_section)));
            let date = date.as_deref().map(parse_date).transpose()?;

            let rows = StudentLogic::list(&pool, &filter, date)?;
            if rows.is_empty() {
                info(format!("No students in section '{}'.", filter.label()));
                return Ok(());
            }

            let title = match date {
                Some(d) => format!("Section {} on {}", filter.label(), d.format("%Y-%m-%d")),
                None => format!("Section {}", filter.label()),
            };
            header(title);

            let mut table =
                Table::with_headers(&["Roll", "ID", "Name", "Admission", "Sections", "Status"]);
            for (entry, status) in &rows {
                table.add_row(vec![
                    entry.roll_number.to_string(),
                    entry.student.id.to_string(),
                    entry.student.name.clone(),
                    entry.student.admission_number.clone(),
                    entry.student.sections_label(),
                    colorize_status(*status),
                ]);
            }
            print!("{}", table.render());
        }

        StudentAction::Sections => {
            let counts = queries::section_counts(&pool.conn)?;
            if counts.is_empty() {
                info("No sections yet.");
                return Ok(());
            }

            let mut table = Table::with_headers(&["Section", "Students"]);
            for (section, n) in counts {
                table.add_row(vec![section, n.to_string()]);
            }
            print!("{}", table.render());
        }

        StudentAction::Edit {
            id,
            name,
            admission,
            sections,
        } => {
            let changes = StudentChanges {
                name: name.as_deref(),
                admission: admission.as_deref(),
                sections: (!sections.is_empty()).then_some(sections.as_slice()),
            };
            let s = StudentLogic::edit(&mut pool, *id, &changes)?;
            success(format!(
                "Student updated: {} (ID: {}) [{}]",
                s.name,
                s.id,
                s.sections_label()
            ));
        }

        StudentAction::Export {
            file,
            section,
            force,
        } => {
            let filter =
                SectionFilter::parse(Some(section.as_deref().unwrap_or(&cfg.default_section)));
            let path = Path::new(file);
            ensure_writable(path, *force)?;

            let n = StudentLogic::export_csv(&pool, &filter, path)?;
            if n == 0 {
                info(format!("No students in section '{}'.", filter.label()));
            }
            success(format!("{n} students exported to {}", path.display()));
        }
    }

    Ok(())
}
