//! Configuration types for the task tracker.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
///
/// Every field has a default, so an empty (or absent) `config.toml` yields a
/// fully working setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Task store settings.
    pub store: StoreConfig,
    /// Reminder loop settings.
    pub reminders: ReminderConfig,
}

/// Task store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the tasks file (None = `<data_dir>/taskbell/tasks.json`).
    pub tasks_file: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolve the tasks file path, falling back to the platform default.
    pub fn resolved_tasks_file(&self) -> PathBuf {
        self.tasks_file
            .clone()
            .unwrap_or_else(crate::taskbell_dirs::tasks_file)
    }
}

/// Reminder loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Whether the background reminder loop runs at all.
    pub enabled: bool,
    /// Seconds between reminder scans. Values above 60 skip the
    /// five-minute reminder marks.
    pub tick_interval_secs: u64,
    /// Display-duration hint for desktop notifications, in seconds.
    pub notification_timeout_secs: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval_secs: crate::reminder::runner::TICK_INTERVAL_SECS,
            notification_timeout_secs: crate::notify::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::TrackerError::Config(e.to_string()))
    }

    /// Load the config file at the default location, or defaults when the
    /// file does not exist.
    pub fn load_default() -> crate::error::Result<Self> {
        let path = crate::taskbell_dirs::config_file();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TrackerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
