//! End-to-end reminder flow: store on disk → scheduler loop → notifier.

use chrono::{Duration, Local};
use std::sync::Arc;
use taskbell::notify::{CapturingNotifier, REMINDER_TITLE};
use taskbell::reminder::ReminderScheduler;
use taskbell::store::{CompleteOutcome, TaskStore};
use taskbell::task::{Priority, Recurrence, Task};
use tokio_util::sync::CancellationToken;

fn task_due_in_minutes(name: &str, minutes: i64) -> Task {
    Task::new(
        name,
        Local::now().naive_local() + Duration::minutes(minutes),
        "integration",
        Priority::High,
        Recurrence::None,
        "",
    )
}

#[tokio::test]
async fn scheduler_notifies_for_imminent_task_and_shuts_down_on_cancel() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TaskStore::new(dir.path().join("tasks.json"));
    store
        .save(&[
            task_due_in_minutes("imminent", 2),
            task_due_in_minutes("distant", 120),
        ])
        .expect("seed tasks");

    let notifier = Arc::new(CapturingNotifier::new());
    let cancel = CancellationToken::new();
    let scheduler = ReminderScheduler::new(store, notifier.clone(), cancel.clone())
        .with_tick_interval_secs(1);
    let handle = scheduler.run();

    tokio::time::timeout(std::time::Duration::from_secs(10), async {
        while notifier.delivered().is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
    })
    .await
    .expect("a reminder should fire for the imminent task");

    cancel.cancel();
    tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("scheduler should stop promptly after cancel")
        .expect("scheduler task should not panic");

    let delivered = notifier.delivered();
    assert!(
        delivered
            .iter()
            .all(|(title, _)| title == REMINDER_TITLE)
    );
    assert!(
        delivered
            .iter()
            .all(|(_, message)| message.starts_with("imminent is due in")),
        "only the imminent task should fire, got: {delivered:?}"
    );
}

#[tokio::test]
async fn scheduler_picks_up_tasks_added_after_start() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TaskStore::new(dir.path().join("tasks.json"));

    let notifier = Arc::new(CapturingNotifier::new());
    let cancel = CancellationToken::new();
    let scheduler = ReminderScheduler::new(store.clone(), notifier.clone(), cancel.clone())
        .with_tick_interval_secs(1);
    let handle = scheduler.run();

    // The store file does not even exist yet; the loop tolerates that.
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    store
        .add(task_due_in_minutes("late arrival", 3))
        .expect("add task");

    tokio::time::timeout(std::time::Duration::from_secs(10), async {
        while notifier.delivered().is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }
    })
    .await
    .expect("the newly added task should fire on a later tick");

    cancel.cancel();
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), handle).await;
}

#[test]
fn completing_recurring_task_keeps_history_and_regenerates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TaskStore::new(dir.path().join("tasks.json"));

    let due = Local::now().naive_local() + Duration::hours(1);
    store
        .add(Task::new(
            "weekly review",
            due,
            "work",
            Priority::Medium,
            Recurrence::Weekly,
            "",
        ))
        .expect("add task");

    let successor = match store.mark_complete("weekly review").expect("complete") {
        CompleteOutcome::Completed { successor } => successor,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(successor.expect("successor").due_date, due + Duration::days(7));

    let pending = store.pending().expect("pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].due_date, due + Duration::days(7));
    assert!(!pending[0].completed);

    let history = store.history().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].due_date, due);
    assert!(history[0].completed);
}

#[test]
fn store_round_trips_through_disk_field_for_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");

    let tasks = vec![
        Task::new(
            "alpha",
            Local::now().naive_local().truncated_to_minute(),
            "one",
            Priority::High,
            Recurrence::Daily,
            "notes here",
        ),
        Task::new(
            "beta",
            Local::now().naive_local().truncated_to_minute() + Duration::days(2),
            "two",
            Priority::Low,
            Recurrence::None,
            "",
        ),
    ];

    TaskStore::new(&path).save(&tasks).expect("save");
    let reloaded = TaskStore::new(&path).load().expect("load");
    assert_eq!(reloaded, tasks);
}

/// The wire format has minute precision; drop sub-minute parts before
/// comparing round-trips.
trait MinutePrecision {
    fn truncated_to_minute(self) -> Self;
}

impl MinutePrecision for chrono::NaiveDateTime {
    fn truncated_to_minute(self) -> Self {
        use chrono::{NaiveTime, Timelike};
        let time = NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
            .expect("valid truncated time");
        self.date().and_time(time)
    }
}
