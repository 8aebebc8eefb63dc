use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::SectionFilter;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::snapshot::SnapshotStore;
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::export::{ExportLogic, ExportRequest};
use crate::ui::messages::warning;
use crate::utils::date::today;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        section,
        range,
        format,
        file,
        from_backup,
        force,
    } = cmd
    {
        let (start, end) = match range.as_deref() {
            Some(r) => parse_range(r)?,
            None => (today(), today()),
        };

        let req = ExportRequest {
            section: SectionFilter::parse(Some(
                section.as_deref().unwrap_or(&cfg.default_section),
            )),
            start,
            end,
            format: *format,
            file: file.as_deref(),
            out_dir: Some(cfg.export_dir.as_str()),
            report_type: &cfg.report_type,
            force: *force,
        };

        match from_backup {
            Some(snapshot) => {
                let store = SnapshotStore::from_path(Path::new(snapshot))?;
                if !store.rejected().is_empty() {
                    warning(format!(
                        "{} malformed records in {} were skipped",
                        store.rejected().len(),
                        snapshot
                    ));
                }
                ExportLogic::export(&store, &req)?;
            }
            None => {
                let pool = DbPool::new(&cfg.database)?;
                let path = ExportLogic::export(&pool, &req)?;
                audit(
                    &pool.conn,
                    "export",
                    &path.to_string_lossy(),
                    &format!(
                        "{} report, section {}, {} to {}",
                        format.as_str(),
                        req.section.label(),
                        start,
                        end
                    ),
                );
            }
        }
    }
    Ok(())
}
