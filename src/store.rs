//! Whole-file JSON task store.
//!
//! Tasks live in a single pretty-printed JSON array, loaded wholesale and
//! rewritten in full on every save. The file is the single source of truth;
//! every mutating operation is load → mutate → save. Saves replace the file
//! atomically (temp file + rename), so a concurrent reader sees either the
//! old or the new snapshot, never a torn one.

use crate::error::{Result, TrackerError};
use crate::task::Task;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of [`TaskStore::mark_complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// The task was marked completed. For recurring tasks, carries the
    /// successor that was appended to the store.
    Completed { successor: Option<Task> },
    /// No pending task with that name exists.
    NotFound,
}

/// File-backed task collection.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Create a store backed by the given file. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all task records.
    ///
    /// A missing file is an empty collection. Individual malformed records
    /// (bad timestamp, wrong shape) are skipped with a warning; the valid
    /// remainder still loads.
    pub fn load(&self) -> Result<Vec<Task>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(TrackerError::Store(format!(
                    "cannot read {}: {e}",
                    self.path.display()
                )));
            }
        };

        let records: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|e| TrackerError::Store(format!("cannot parse {}: {e}", self.path.display())))?;

        let mut tasks = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Task>(record) {
                Ok(task) => tasks.push(task),
                Err(e) => warn!("skipping malformed task record: {e}"),
            }
        }
        Ok(tasks)
    }

    /// Replace the stored collection wholesale.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrackerError::Store(format!("cannot create store directory: {e}"))
            })?;
        }

        let json = serde_json::to_string_pretty(tasks)
            .map_err(|e| TrackerError::Store(format!("cannot serialize tasks: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| TrackerError::Store(format!("cannot write store temp file: {e}")))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| TrackerError::Store(format!("cannot finalize store file: {e}")))?;

        debug!("saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Append a new task.
    pub fn add(&self, task: Task) -> Result<()> {
        let mut tasks = self.load()?;
        tasks.push(task);
        self.save(&tasks)
    }

    /// Pending tasks, highest priority first, then earliest due date.
    pub fn pending(&self) -> Result<Vec<Task>> {
        let mut pending: Vec<Task> = self
            .load()?
            .into_iter()
            .filter(|t| !t.completed)
            .collect();
        pending.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.due_date.cmp(&b.due_date))
        });
        Ok(pending)
    }

    /// Completed tasks, most recent due date first.
    pub fn history(&self) -> Result<Vec<Task>> {
        let mut completed: Vec<Task> = self
            .load()?
            .into_iter()
            .filter(|t| t.completed)
            .collect();
        completed.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(completed)
    }

    /// Mark the first pending task with the given name as completed.
    ///
    /// A recurring task additionally spawns exactly one pending successor
    /// with the due date advanced. An unknown or already-completed name
    /// mutates nothing.
    pub fn mark_complete(&self, name: &str) -> Result<CompleteOutcome> {
        let mut tasks = self.load()?;

        let Some(index) = tasks.iter().position(|t| t.name == name && !t.completed) else {
            return Ok(CompleteOutcome::NotFound);
        };

        tasks[index].completed = true;
        let successor = tasks[index].next_occurrence();
        if let Some(next) = successor.clone() {
            tasks.push(next);
        }
        self.save(&tasks)?;
        Ok(CompleteOutcome::Completed { successor })
    }

    /// Delete every task with the given name. Returns `true` when anything
    /// was removed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|t| t.name != name);
        let removed = tasks.len() != before;
        if removed {
            self.save(&tasks)?;
        }
        Ok(removed)
    }

    /// Pending tasks in storage order, without the display sorting.
    /// This is the scanner's per-tick working set.
    pub fn pending_snapshot(&self) -> Result<Vec<Task>> {
        Ok(self.load()?.into_iter().filter(|t| !t.completed).collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::task::{Priority, Recurrence};
    use chrono::{NaiveDate, NaiveDateTime};

    fn due(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn task(name: &str, d: u32, priority: Priority, recurrence: Recurrence) -> Task {
        Task::new(name, due(d, 9), "test", priority, recurrence, "")
    }

    fn temp_store() -> (tempfile::TempDir, TaskStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TaskStore::new(dir.path().join("tasks.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = temp_store();
        let tasks = vec![
            task("a", 1, Priority::High, Recurrence::None),
            task("b", 2, Priority::Low, Recurrence::Weekly),
        ];
        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn malformed_record_is_skipped() {
        let (_dir, store) = temp_store();
        let json = r#"[
            {"name":"good","due_date":"2026-05-01 09:00","category":"t","priority":"High"},
            {"name":"bad","due_date":"not a date","category":"t","priority":"High"},
            {"name":"also good","due_date":"2026-05-02 09:00","category":"t","priority":"Low"}
        ]"#;
        std::fs::write(store.path(), json).unwrap();

        let tasks = store.load().unwrap();
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["good", "also good"]);
    }

    #[test]
    fn pending_excludes_completed_and_sorts_by_priority_then_due() {
        let (_dir, store) = temp_store();
        let mut done = task("done", 1, Priority::High, Recurrence::None);
        done.completed = true;
        store
            .save(&[
                task("late low", 1, Priority::Low, Recurrence::None),
                task("soon high", 2, Priority::High, Recurrence::None),
                task("early high", 1, Priority::High, Recurrence::None),
                done,
                task("mid", 1, Priority::Medium, Recurrence::None),
            ])
            .unwrap();

        let names: Vec<String> = store.pending().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["early high", "soon high", "mid", "late low"]);
    }

    #[test]
    fn history_excludes_pending_and_sorts_due_descending() {
        let (_dir, store) = temp_store();
        let mut first = task("first", 1, Priority::Low, Recurrence::None);
        first.completed = true;
        let mut last = task("last", 9, Priority::Low, Recurrence::None);
        last.completed = true;
        store
            .save(&[first, task("open", 5, Priority::High, Recurrence::None), last])
            .unwrap();

        let names: Vec<String> = store.history().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["last", "first"]);
    }

    #[test]
    fn complete_marks_task_and_spawns_recurring_successor() {
        let (_dir, store) = temp_store();
        store
            .save(&[task("standup", 1, Priority::Medium, Recurrence::Daily)])
            .unwrap();

        let outcome = store.mark_complete("standup").unwrap();
        let CompleteOutcome::Completed { successor } = outcome else {
            panic!("expected completion");
        };
        assert_eq!(successor.unwrap().due_date, due(2, 9));

        let tasks = store.load().unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0].completed);
        assert!(!tasks[1].completed);
        assert_eq!(tasks[1].due_date, due(2, 9));
    }

    #[test]
    fn complete_non_recurring_spawns_nothing() {
        let (_dir, store) = temp_store();
        store
            .save(&[task("oneshot", 1, Priority::Low, Recurrence::None)])
            .unwrap();

        let outcome = store.mark_complete("oneshot").unwrap();
        assert_eq!(outcome, CompleteOutcome::Completed { successor: None });
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn complete_unknown_name_is_noop() {
        let (_dir, store) = temp_store();
        let tasks = vec![task("a", 1, Priority::Low, Recurrence::None)];
        store.save(&tasks).unwrap();

        assert_eq!(store.mark_complete("missing").unwrap(), CompleteOutcome::NotFound);
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn complete_already_completed_is_noop() {
        let (_dir, store) = temp_store();
        let mut done = task("done", 1, Priority::Low, Recurrence::Daily);
        done.completed = true;
        store.save(&[done.clone()]).unwrap();

        assert_eq!(store.mark_complete("done").unwrap(), CompleteOutcome::NotFound);
        assert_eq!(store.load().unwrap(), vec![done]);
    }

    #[test]
    fn delete_removes_all_matches() {
        let (_dir, store) = temp_store();
        store
            .save(&[
                task("dup", 1, Priority::Low, Recurrence::None),
                task("dup", 2, Priority::High, Recurrence::None),
                task("keep", 3, Priority::Low, Recurrence::None),
            ])
            .unwrap();

        assert!(store.delete("dup").unwrap());
        let names: Vec<String> = store.load().unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["keep"]);
    }

    #[test]
    fn delete_unknown_name_is_noop() {
        let (_dir, store) = temp_store();
        let tasks = vec![task("a", 1, Priority::Low, Recurrence::None)];
        store.save(&tasks).unwrap();

        assert!(!store.delete("missing").unwrap());
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let (_dir, store) = temp_store();
        store.save(&[task("a", 1, Priority::Low, Recurrence::None)]).unwrap();
        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());
    }
}
