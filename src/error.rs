//! Error types for the task tracker.

/// Top-level error type for the tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Task store load/save error.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Notification delivery error.
    #[error("notify error: {0}")]
    Notify(String),

    /// Reminder scheduler error.
    #[error("scheduler error: {0}")]
    Scheduler(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, TrackerError>;
