// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Verifica se un file può essere creato o sovrascritto.
///
/// - Se il file NON esiste → Ok
/// - Se esiste ed è abilitato `force` → Ok
/// - Se esiste e `force == false` → chiede conferma all'utente.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "cancelled: '{}' not overwritten",
            path.display()
        )))
    }
}

/// Output path of a report.
///
/// An explicit `--file` must be absolute. Otherwise the conventional file
/// name is placed in `out_dir` (created if missing), or in the current
/// directory.
pub(crate) fn resolve_output_path(
    file: Option<&str>,
    out_dir: Option<&str>,
    default_name: &str,
) -> AppResult<PathBuf> {
    if let Some(f) = file {
        let path = PathBuf::from(f);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {f}"
            )));
        }
        return Ok(path);
    }

    let dir = match out_dir.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => {
            let dir = crate::utils::path::expand_tilde(d);
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };

    Ok(dir.join(default_name))
}
