// src/export/mod.rs

mod csv;
pub mod filename;
pub mod fs_utils;
mod json;
pub mod logic;
pub mod model;
pub mod range;
mod xlsx;

pub use self::csv::render_csv;
pub use logic::{ExportLogic, ExportRequest};
pub use model::AttendanceReport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}
