use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::db::snapshot::SnapshotStore;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database (or, with `json`, a JSON snapshot of students and
    /// the attendance log) to `dest_file`, optionally zip-compressed.
    pub fn backup(
        pool: &DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        json: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !json && !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        ensure_writable(dest, force)?;

        if json {
            let students = queries::load_students(&pool.conn)?;
            let entries = queries::load_all_log_entries(&pool.conn)?;
            let snapshot = SnapshotStore::to_json(&students, &entries);
            fs::write(dest, serde_json::to_string_pretty(&snapshot)?)?;
            success(format!(
                "Snapshot written: {} ({} students, {} log entries)",
                dest.display(),
                students.len(),
                entries.len()
            ));
        } else {
            fs::copy(src, dest)?;
            success(format!("Backup created: {}", dest.display()));
        }

        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if compressed != dest {
                if let Err(e) = fs::remove_file(dest) {
                    warning(format!("Failed to remove uncompressed backup: {}", e));
                } else {
                    info(format!("Removed uncompressed backup: {}", dest.display()));
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        audit(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            match (json, compress) {
                (true, true) => "JSON snapshot created and compressed",
                (true, false) => "JSON snapshot created",
                (false, true) => "Backup created and compressed",
                (false, false) => "Backup created",
            },
        );

        Ok(final_path)
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("invalid backup path: {}", path.display())))?;

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("📦 Compressed: {}", zip_path.display()));

    Ok(zip_path)
}
