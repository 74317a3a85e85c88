//! Taskbell: personal task tracker with desktop due-date reminders.
//!
//! # Architecture
//!
//! Two independent units of execution share one JSON tasks file:
//! - **Interactive menu** ([`menu`]): numbered stdin menu mutating the store
//!   (add, list, complete, history, delete).
//! - **Reminder scheduler** ([`reminder`]): a background loop scanning
//!   pending tasks once per minute and raising desktop notifications as due
//!   dates approach, until cancelled.
//!
//! Completing a recurring task spawns its successor through the pure
//! recurrence engine in [`task`]. Saves are atomic whole-file replacements;
//! a scheduler read racing a menu write sees either the old or the new
//! snapshot, never a torn one.

pub mod config;
pub mod error;
pub mod menu;
pub mod notify;
pub mod reminder;
pub mod store;
pub mod task;
pub mod taskbell_dirs;

pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use notify::{DesktopNotifier, Notifier};
pub use reminder::ReminderScheduler;
pub use store::TaskStore;
pub use task::{Priority, Recurrence, Task};
