//! Keeps an existing config file in line with the current `Config` fields.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;

    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;

    match yaml {
        Value::Mapping(_) => Ok(yaml),
        // an empty file parses as null
        Value::Null => Ok(Value::Mapping(Default::default())),
        _ => Err(AppError::ConfigLoad(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

/// Config keys absent from the file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let yaml = read_mapping(path)?;
    let Some(map) = yaml.as_mapping() else {
        return Ok(Config::KEYS.to_vec());
    };

    Ok(Config::KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .collect())
}

/// Add every missing key with its default value and rewrite the file.
/// Keys already present keep their values. Returns the keys added.
pub fn add_missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut yaml = read_mapping(path)?;
    let defaults = serde_yaml::to_value(Config::default())?;

    let mut added = Vec::new();

    if let (Some(map), Some(def)) = (yaml.as_mapping_mut(), defaults.as_mapping()) {
        for key in Config::KEYS {
            let k = Value::String(key.to_string());
            if map.contains_key(&k) {
                continue;
            }
            if let Some(v) = def.get(&k) {
                map.insert(k, v.clone());
                added.push(key);
            }
        }
    }

    if !added.is_empty() {
        let serialized =
            serde_yaml::to_string(&yaml).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        fs::write(path, serialized)
            .map_err(|e| AppError::ConfigSave(format!("{}: {e}", path.display())))?;
    }

    Ok(added)
}
