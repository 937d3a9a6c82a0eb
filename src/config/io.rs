use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use super::AppConfig;

/// Load the config file, falling back to defaults on any problem.
pub fn load_config(path: &Path) -> AppConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match parse_config(&contents) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML; using defaults: {err}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).context("parse config TOML")
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("serialize config TOML")
}

/// Best-effort write-back (window geometry and the like); failures are
/// logged, never surfaced.
pub fn save_config(path: &Path, config: &AppConfig) {
    let contents = match serialize_config(config) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("Could not serialize config: {err}");
            return;
        }
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Err(err) = fs::write(path, contents) {
        warn!(path = %path.display(), "Could not write config: {err}");
    }
}
