//! Task record, priority/recurrence enums, and the recurrence engine.
//!
//! Due dates carry minute precision and serialize as `"YYYY-MM-DD HH:MM"`
//! in naive local time, which keeps the tasks file human-editable.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Task priority.
///
/// Variant order is the semantic sort order: `High` sorts before `Medium`
/// sorts before `Low`. Listings rely on the derived [`Ord`], not on the
/// serialized label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority '{other}' (expected High/Medium/Low)")),
        }
    }
}

/// How a completed task regenerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// One-shot task; completion is final.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Offset applied to the due date of the successor task.
    ///
    /// Monthly is a fixed 30-day approximation, not calendar-month-aware.
    pub fn offset(self) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Daily => Some(Duration::days(1)),
            Self::Weekly => Some(Duration::days(7)),
            Self::Monthly => Some(Duration::days(30)),
        }
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl std::str::FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!(
                "unknown recurrence '{other}' (expected daily/weekly/monthly/none)"
            )),
        }
    }
}

/// A single tracked task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Lookup key. Not guaranteed unique by the store.
    pub name: String,
    /// Due timestamp, minute precision, naive local time.
    #[serde(with = "due_date_format")]
    pub due_date: NaiveDateTime,
    /// Free-text label.
    pub category: String,
    pub priority: Priority,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Free-text notes; empty when absent.
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new pending task.
    pub fn new(
        name: impl Into<String>,
        due_date: NaiveDateTime,
        category: impl Into<String>,
        priority: Priority,
        recurrence: Recurrence,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            due_date,
            category: category.into(),
            priority,
            recurrence,
            notes: notes.into(),
            completed: false,
        }
    }

    /// Compute the successor of a completed recurring task.
    ///
    /// Returns a pending copy with the due date advanced by the recurrence
    /// offset, or `None` when the task does not recur. Pure; the store
    /// decides whether to append the result.
    pub fn next_occurrence(&self) -> Option<Task> {
        let offset = self.recurrence.offset()?;
        let mut next = self.clone();
        next.completed = false;
        next.due_date += offset;
        Some(next)
    }

    /// Returns `true` for a pending task whose due date has passed.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due_date < now
    }
}

/// Serde adapter for the `"YYYY-MM-DD HH:MM"` due-date format.
mod due_date_format {
    use super::{DUE_DATE_FORMAT, NaiveDateTime};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DUE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DUE_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Parse a user-entered due date in the wire format.
pub fn parse_due_date(input: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(input.trim(), DUE_DATE_FORMAT)
        .map_err(|e| format!("invalid due date '{}' (expected YYYY-MM-DD HH:MM): {e}", input.trim()))
}
