//! Environment-driven runtime configuration shared by the binaries.
//!
//! # Invariants
//! - Configuration is read once at startup and passed down explicitly.
//! - Blank variables are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SKIBIDICT_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "SKIBIDICT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SKIBIDICT_LOG_DIR";

pub const DEFAULT_DB_PATH: &str = "skibidict.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rotating log files; stderr when `None`.
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR),
        }
    }
}
