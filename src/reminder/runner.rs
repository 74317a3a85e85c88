//! Reminder scheduler background loop.
//!
//! Spawns a tokio task that ticks at a fixed cadence, loads a fresh store
//! snapshot, runs the firing policy, and dispatches the resulting
//! notifications. The loop runs until its [`CancellationToken`] is
//! cancelled; cancellation between ticks stops the loop without delay.
//!
//! The store file is shared with the interactive surface without locking.
//! A save landing mid-tick means this tick sees a slightly stale or slightly
//! fresher snapshot; saves replace the file atomically, so never a torn one.

use crate::notify::{self, Notifier};
use crate::reminder::scanner;
use crate::store::TaskStore;
use chrono::Local;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Interval between scheduler ticks (seconds).
///
/// The firing ladder checks five-minute marks, so the cadence must stay at
/// or below one minute for marks not to be skipped.
pub const TICK_INTERVAL_SECS: u64 = 60;

/// Background loop pairing the scanner with a notifier.
pub struct ReminderScheduler {
    store: TaskStore,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationToken,
    tick_interval_secs: u64,
}

impl ReminderScheduler {
    /// Create a scheduler. The loop runs until `cancel` is cancelled.
    pub fn new(store: TaskStore, notifier: Arc<dyn Notifier>, cancel: CancellationToken) -> Self {
        Self {
            store,
            notifier,
            cancel,
            tick_interval_secs: TICK_INTERVAL_SECS,
        }
    }

    /// Override the tick cadence. Cadences above 60 s skip five-minute marks.
    pub fn with_tick_interval_secs(mut self, secs: u64) -> Self {
        self.tick_interval_secs = secs.max(1);
        self
    }

    /// Start the background loop.
    pub fn run(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "reminder scheduler started (tick every {}s, watching {})",
                self.tick_interval_secs,
                self.store.path().display()
            );
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(self.tick_interval_secs));
            // The first interval tick completes immediately; consume it, so
            // the first scan happens one full interval after start.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.cancel.cancelled() => {
                        info!("reminder scheduler stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        self.tick();
                    }
                }
            }
        })
    }

    /// Execute one tick: snapshot the store, scan, dispatch.
    ///
    /// Failures never kill the loop: an unreadable store skips the tick and
    /// a failed delivery skips that notification.
    pub fn tick(&self) {
        let tasks = match self.store.pending_snapshot() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("skipping reminder tick, cannot read task store: {e}");
                return;
            }
        };

        let now = Local::now().naive_local();
        let reminders = scanner::scan(now, &tasks);
        if reminders.is_empty() {
            debug!("reminder tick: {} pending tasks, nothing due", tasks.len());
            return;
        }

        for reminder in reminders {
            let message = notify::render_message(&reminder.task_name, reminder.minutes_left);
            debug!("dispatching reminder: {message}");
            if let Err(e) = self.notifier.notify(notify::REMINDER_TITLE, &message) {
                warn!("cannot deliver reminder for '{}': {e}", reminder.task_name);
            }
        }
    }
}
