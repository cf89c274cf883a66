//! User-facing error notifications.

use tracing::warn;

/// Receives human-readable messages from failed searches.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Notifier that writes messages to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, message: &str) {
        warn!("{message}");
    }
}

/// Notifier that remembers every message, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
