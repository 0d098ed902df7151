//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Decide where the local storage database and logs live.
//! - Decide the log level when the caller does not pass one.
//!
//! # Invariants
//! - `data_dir` is always absolute.
//! - Blank environment values are treated as unset.

use crate::logging::{default_log_level, normalize_level};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PORTAL_DATA_DIR";
/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "PORTAL_LOG_LEVEL";

const DEFAULT_DATA_DIR_NAME: &str = "app_portal";
const STORAGE_FILE_NAME: &str = "portal_storage.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl PortalConfig {
    /// Builds a config rooted at `data_dir` with the build-mode default level.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: absolutize(data_dir.into()),
            log_level: default_log_level().to_string(),
        }
    }

    /// Resolves the config from `PORTAL_DATA_DIR` and `PORTAL_LOG_LEVEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PortalConfig::from_env`], with a caller-provided lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = non_blank(lookup(DATA_DIR_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME));

        // Unknown levels fall back to the default instead of failing startup.
        let log_level = non_blank(lookup(LOG_LEVEL_ENV))
            .and_then(|raw| normalize_level(&raw).ok())
            .unwrap_or_else(default_log_level)
            .to_string();

        Self {
            data_dir: absolutize(data_dir),
            log_level,
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or_else(|_| Path::new("/").join(path))
}
