//! Configuration file upgrades: add keys introduced after the file was written.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys of the current configuration format, with their default values.
fn expected_keys() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Names of the keys the file at `path` is missing.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;

    Ok(expected_keys()?
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Fill in missing keys with their defaults, keeping every existing value.
/// Returns `true` when the file was rewritten.
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    let mut added = Vec::new();

    for (key, value) in expected_keys()? {
        if !current.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            current.insert(key, value);
        }
    }

    if added.is_empty() {
        info("Configuration file is up to date.");
        return Ok(false);
    }

    fs::write(path, serde_yaml::to_string(&Value::Mapping(current))?)?;
    success(format!("Configuration migrated, added: {}", added.join(", ")));
    Ok(true)
}
