//! Centralized application directory paths.
//!
//! Single source of truth for the filesystem locations the tracker uses.
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! # Environment Overrides
//!
//! - `TASKBELL_DATA_DIR` — overrides [`data_dir`]
//! - `TASKBELL_CONFIG_DIR` — overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the tasks file. Resolves to `dirs::data_dir()/taskbell/` by
/// default; override with `TASKBELL_DATA_DIR`.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("TASKBELL_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("taskbell"))
        .unwrap_or_else(|| PathBuf::from("/tmp/taskbell-data"))
}

/// Application config directory.
///
/// Holds `config.toml`. Resolves to `dirs::config_dir()/taskbell/` by
/// default; override with `TASKBELL_CONFIG_DIR`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("TASKBELL_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("taskbell"))
        .unwrap_or_else(|| PathBuf::from("/tmp/taskbell-config"))
}

/// Tasks file path (`data_dir()/tasks.json`).
#[must_use]
pub fn tasks_file() -> PathBuf {
    data_dir().join("tasks.json")
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
