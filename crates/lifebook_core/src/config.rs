//! Process-wide configuration.
//!
//! # Responsibility
//! - Define the config file schema (log level, user prefs location).
//! - Supply defaults for missing or unknown fields so a partial file heals.
//!
//! # Invariants
//! - Every field carries a serde default; deserializing `{}` yields
//!   `Config::default()`.
//! - The config file is rewritten after load to normalize its schema.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Well-known config location used when no path is supplied at startup.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Directory for rolling log files.
pub const DEFAULT_LOG_DIR: &str = "logs";

fn default_log_level() -> String {
    crate::logging::default_log_level().to_string()
}

fn default_user_prefs_path() -> PathBuf {
    PathBuf::from("preferences.json")
}

/// Process-wide settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level applied at logging init (`trace|debug|info|warn|error`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Location of the user preferences file.
    #[serde(default = "default_user_prefs_path")]
    pub user_prefs_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            user_prefs_path: default_user_prefs_path(),
        }
    }
}

impl Config {
    pub fn user_prefs_path(&self) -> &Path {
        &self.user_prefs_path
    }
}
