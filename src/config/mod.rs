use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

const APP_DIR: &str = "stutra";
const CONFIG_FILE: &str = "stutra.conf";
const DATABASE_FILE: &str = "stutra.sqlite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Section used by `export`, `summary` and `student list` when none is given.
    #[serde(default = "default_section")]
    pub default_section: String,
    /// Empty → current directory.
    #[serde(default)]
    pub export_dir: String,
    /// First component of generated report file names.
    #[serde(default = "default_report_type")]
    pub report_type: String,
    /// Run the daily reset before `mark` and `student list`.
    #[serde(default = "default_auto_reset")]
    pub auto_reset: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_section() -> String {
    crate::core::roster::ALL_SECTIONS.to_string()
}
fn default_report_type() -> String {
    "attendance".to_string()
}
fn default_auto_reset() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_section: default_section(),
            export_dir: String::new(),
            report_type: default_report_type(),
            auto_reset: default_auto_reset(),
        }
    }
}

impl Config {
    /// Keys every config file is expected to carry.
    pub const KEYS: [&'static str; 5] = [
        "database",
        "default_section",
        "export_dir",
        "report_type",
        "auto_reset",
    ];

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!(".{APP_DIR}"))
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::ConfigSave(e.to_string()))?;
        fs::write(path, yaml)
            .map_err(|e| AppError::ConfigSave(format!("{}: {e}", path.display())))
    }

    /// Initialize the configuration directory and file.
    ///
    /// A relative `custom_db` is placed inside the config directory. In test
    /// mode no config file is written. Returns the configuration in effect.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => dir.join(DATABASE_FILE),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            config.save_to(&Self::config_file())?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
