//! Taskbell binary: menu in the foreground, reminder loop in the background.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use taskbell::notify::DesktopNotifier;
use taskbell::reminder::ReminderScheduler;
use taskbell::store::TaskStore;
use taskbell::{TrackerConfig, menu};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Taskbell: personal task tracker with desktop due-date reminders.
#[derive(Parser)]
#[command(name = "taskbell", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing goes to stderr so stdout stays a clean menu surface.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskbell=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        TrackerConfig::from_file(path)?
    } else {
        TrackerConfig::load_default()?
    };

    let store = TaskStore::new(config.store.resolved_tasks_file());
    let cancel = CancellationToken::new();

    let scheduler_handle = if config.reminders.enabled {
        let notifier = Arc::new(DesktopNotifier::new(
            config.reminders.notification_timeout_secs,
        ));
        let scheduler = ReminderScheduler::new(store.clone(), notifier, cancel.clone())
            .with_tick_interval_secs(config.reminders.tick_interval_secs);
        println!("Reminder system started.");
        Some(scheduler.run())
    } else {
        warn!("reminders disabled by config; running menu only");
        None
    };

    // Ctrl+C takes the same cooperative shutdown path as menu exit: the
    // menu future is dropped, then the scheduler is cancelled and awaited.
    let menu_result = tokio::select! {
        result = menu::run(&store) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupt received, shutting down.");
            Ok(())
        }
    };

    cancel.cancel();
    if let Some(handle) = scheduler_handle {
        if let Err(e) = handle.await {
            warn!("reminder scheduler task failed: {e}");
        }
        println!("Reminder system stopped.");
    }
    info!("taskbell shut down cleanly");

    menu_result.map_err(|e| anyhow::anyhow!("menu loop failed: {e}"))
}
