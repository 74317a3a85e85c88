//! Background due-date reminders.
//!
//! The scanner decides which notifications fire on a given tick; the runner
//! is the periodic loop that feeds it and dispatches the results.

pub mod runner;
pub mod scanner;

pub use runner::ReminderScheduler;
pub use scanner::{Reminder, scan};
