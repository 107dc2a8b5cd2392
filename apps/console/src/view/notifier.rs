use parking_lot::Mutex;

/// Modal-style user notification (the browser's `alert`).
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Keeps every alert so a host can drain and display them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.alerts.lock().last().cloned()
    }

    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.alerts.lock())
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}
