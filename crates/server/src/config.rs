use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub log_filter: String,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "0.0.0.0:8080".into(),
            log_filter: "info".into(),
            max_body_bytes: 16 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let path = std::env::var("APP__CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    load_settings_with(&path, |key| std::env::var(key).ok())
}

/// Layers defaults, then the TOML file at `path` (if readable), then `env`.
/// Later sources win; values that fail to parse are skipped.
pub fn load_settings_with(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(file_cfg) = read_file_table(path) {
        if let Some(v) = file_cfg.get("bind_addr") {
            settings.server_bind = v.clone();
        }
        if let Some(v) = file_cfg.get("log_filter") {
            settings.log_filter = v.clone();
        }
        if let Some(parsed) = file_cfg
            .get("max_body_bytes")
            .and_then(|v| v.parse::<usize>().ok())
        {
            settings.max_body_bytes = parsed;
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }

    settings
}

// Flat table of scalars; numbers and booleans are kept in their TOML spelling.
fn read_file_table(path: &Path) -> Option<HashMap<String, String>> {
    let raw = fs::read_to_string(path).ok()?;
    let table = toml::from_str::<HashMap<String, toml::Value>>(&raw).ok()?;
    Some(
        table
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, value))
            })
            .collect(),
    )
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
