// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading, merging and saving.

use crate::error::{CmgError, ConfigError, Result};
use std::path::{Path, PathBuf};

use super::schema::CmgConfig;

/// Project configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["cmg.toml", ".cmg.toml", ".config/cmg.toml"];

/// Path of the per-user configuration file written by `cmg config`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cmg").join("config.toml"))
}

/// Find a project configuration file in the current directory or its parents.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find a project configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from the default locations.
///
/// The user file is the base; keys set in a project file found from the
/// working directory override it.
pub fn load_config() -> Result<CmgConfig> {
    let base = match user_config_path().filter(|p| p.is_file()) {
        Some(path) => read_table(&path)?,
        None => {
            tracing::debug!("No user configuration file found, using defaults");
            toml::Table::new()
        }
    };

    let table = match find_config_file() {
        Some(path) => merge_configs(base, read_table(&path)?),
        None => base,
    };

    let config = config_from_table(table)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<CmgConfig> {
    let config = config_from_table(read_table(path)?)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<CmgConfig> {
    config_from_table(parse_table(content)?)
}

fn read_table(path: &Path) -> Result<toml::Table> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(CmgError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        CmgError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_table(&content)
}

fn parse_table(content: &str) -> Result<toml::Table> {
    toml::from_str::<toml::Table>(content).map_err(|e| {
        CmgError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

fn config_from_table(table: toml::Table) -> Result<CmgConfig> {
    toml::Value::Table(table).try_into::<CmgConfig>().map_err(|e| {
        CmgError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Write configuration as TOML, creating parent directories as needed.
pub fn save_config_to(path: &Path, config: &CmgConfig) -> Result<()> {
    let write_failed = |message: String| {
        CmgError::Config(ConfigError::WriteFailed {
            path: path.to_path_buf(),
            message,
        })
    };

    let content = toml::to_string_pretty(config).map_err(|e| write_failed(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
    }
    std::fs::write(path, content).map_err(|e| write_failed(e.to_string()))?;

    tracing::debug!("Saved configuration to: {:?}", path);
    Ok(())
}

/// Merge two configuration tables, with keys present in the overlay taking
/// precedence. Nested tables are merged key by key.
pub fn merge_configs(mut base: toml::Table, overlay: toml::Table) -> toml::Table {
    for (key, value) in overlay {
        let merged = match (base.remove(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                toml::Value::Table(merge_configs(base_table, overlay_table))
            }
            (_, value) => value,
        };
        base.insert(key, merged);
    }
    base
}
