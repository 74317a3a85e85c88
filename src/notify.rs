//! Desktop notification delivery.
//!
//! The scheduler hands each firing to a [`Notifier`]; the default
//! implementation shells out to the host notification facility. Exactly one
//! outbound call per firing: retry and dedup live nowhere in this layer
//! (dedup falls out of the scanner's firing ladder).

use crate::error::Result;

/// Notification title used for every reminder.
pub const REMINDER_TITLE: &str = "Task Reminder";

/// Display-duration hint passed to the OS, in seconds. Best effort only.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Render the reminder body for a task and its minutes-left value.
pub fn render_message(task_name: &str, minutes_left: i64) -> String {
    if minutes_left > 0 {
        format!("{task_name} is due in {minutes_left} minutes!")
    } else {
        format!("{task_name} is due now!")
    }
}

/// Pluggable notification capability.
pub trait Notifier: Send + Sync {
    /// Deliver a single notification. One outbound call per invocation.
    fn notify(&self, title: &str, message: &str) -> Result<()>;
}

/// Delivers notifications through the host OS facility.
///
/// macOS uses `osascript`, Linux uses `notify-send` with the display-duration
/// hint. Platforms without a known facility log the reminder at WARN level
/// instead of failing.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    timeout_secs: u64,
}

impl DesktopNotifier {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<()> {
        deliver(title, message, self.timeout_secs)
    }
}

#[cfg(target_os = "macos")]
fn deliver(title: &str, message: &str, _timeout_secs: u64) -> Result<()> {
    // osascript has no display-duration knob; Notification Center owns it.
    let script = format!(
        "display notification {} with title {}",
        applescript_quote(message),
        applescript_quote(title)
    );
    run_command("osascript", &["-e", &script])
}

#[cfg(target_os = "linux")]
fn deliver(title: &str, message: &str, timeout_secs: u64) -> Result<()> {
    let timeout_ms = (timeout_secs * 1000).to_string();
    run_command("notify-send", &["-t", &timeout_ms, title, message])
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn deliver(title: &str, message: &str, _timeout_secs: u64) -> Result<()> {
    tracing::warn!("no desktop notification facility on this platform; {title}: {message}");
    Ok(())
}

#[cfg(any(target_os = "macos", target_os = "linux"))]
fn run_command(program: &str, args: &[&str]) -> Result<()> {
    use crate::error::TrackerError;

    let status = std::process::Command::new(program)
        .args(args)
        .status()
        .map_err(|e| TrackerError::Notify(format!("cannot run {program}: {e}")))?;

    if !status.success() {
        return Err(TrackerError::Notify(format!(
            "{program} exited with {status}"
        )));
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn applescript_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Notifier that records deliveries instead of sending them. Test double.
#[derive(Debug, Default)]
pub struct CapturingNotifier {
    delivered: std::sync::Mutex<Vec<(String, String)>>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(title, message)` pairs delivered so far.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered.lock().expect("notifier lock poisoned").clone()
    }
}

impl Notifier for CapturingNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<()> {
        self.delivered
            .lock()
            .expect("notifier lock poisoned")
            .push((title.to_owned(), message.to_owned()));
        Ok(())
    }
}
