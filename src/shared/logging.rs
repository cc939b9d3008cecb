use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const LEVEL_INFO: &str = "info";
pub const LEVEL_WARN: &str = "warn";
pub const LEVEL_ERROR: &str = "error";

pub fn append_log_line(
    path: &Path,
    level: &str,
    event: &str,
    message: &str,
) -> std::io::Result<()> {
    let payload = serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "level": level,
        "event": event,
        "message": message,
    });
    let line = serde_json::to_string(&payload).map_err(std::io::Error::other)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

/// Sink for failures the UI does not retry: fetch errors, mutation errors and
/// cache updates that could not be applied.
pub trait ErrorReporter {
    fn report(&self, level: &str, event: &str, message: &str);
}

/// Appends structured lines to the session log. Write failures are dropped so
/// reporting never interrupts the UI.
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    path: Option<PathBuf>,
}

impl LogReporter {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ErrorReporter for LogReporter {
    fn report(&self, level: &str, event: &str, message: &str) {
        let Some(path) = &self.path else {
            return;
        };
        let _ = append_log_line(path, level, event, message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedEvent {
    pub level: String,
    pub event: String,
    pub message: String,
}

/// Keeps every report in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Rc<RefCell<Vec<ReportedEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportedEvent> {
        self.events.borrow().clone()
    }

    pub fn event_names(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|entry| entry.event.clone())
            .collect()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, level: &str, event: &str, message: &str) {
        self.events.borrow_mut().push(ReportedEvent {
            level: level.to_string(),
            event: event.to_string(),
            message: message.to_string(),
        });
    }
}
