//! Reminder firing policy.
//!
//! Pure and clock-parameterized: callers pass `now`, which keeps every rule
//! testable without a running loop. The policy mirrors the reminder ladder of
//! the tracker: a 30-minute window, five-minute marks far out, every minute
//! in the final stretch, and a single "due now" firing.
//!
//! The ladder assumes the caller ticks at most once per minute, roughly
//! aligned to minute boundaries. A coarser or badly misaligned cadence will
//! skip the five-minute marks or deliver them twice; the default runner
//! cadence is 60 s.

use crate::task::Task;
use chrono::NaiveDateTime;

/// Outer edge of the reminder window, in minutes before due.
pub const WINDOW_MINUTES: i64 = 30;

/// At or below this many minutes out, remind on every tick.
pub const EVERY_MINUTE_THRESHOLD: i64 = 5;

/// Spacing of reminders in the outer window.
pub const COARSE_STEP_MINUTES: i64 = 5;

/// A notification the scanner decided to fire this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Name of the task the reminder is for.
    pub task_name: String,
    /// Whole minutes until the task is due. Zero means due now.
    pub minutes_left: i64,
}

/// Whole minutes from `now` until `due`, rounded toward negative infinity.
///
/// Floor semantics matter at the boundary: a task even one second overdue is
/// at −1 minutes and therefore outside the window, never "due now".
pub fn minutes_until(now: NaiveDateTime, due: NaiveDateTime) -> i64 {
    (due - now).num_milliseconds().div_euclid(60_000)
}

/// The firing ladder for a single task.
pub fn should_fire(minutes_left: i64) -> bool {
    if !(0..=WINDOW_MINUTES).contains(&minutes_left) {
        return false;
    }
    if minutes_left > EVERY_MINUTE_THRESHOLD {
        return minutes_left % COARSE_STEP_MINUTES == 0;
    }
    // Final stretch (1..=5) every tick, and exactly once at zero.
    true
}

/// Decide which reminders fire this tick.
///
/// Completed tasks never fire; callers typically pass a pending snapshot,
/// but the filter here keeps the policy self-contained.
pub fn scan(now: NaiveDateTime, tasks: &[Task]) -> Vec<Reminder> {
    tasks
        .iter()
        .filter(|task| !task.completed)
        .filter_map(|task| {
            let minutes_left = minutes_until(now, task.due_date);
            should_fire(minutes_left).then(|| Reminder {
                task_name: task.name.clone(),
                minutes_left,
            })
        })
        .collect()
}
