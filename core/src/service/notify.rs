use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ConfirmPrompt, Confirmer, Notice, Notifier, Severity};

/// Writes notices to the log. Useful for headless hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Neutral => {
                tracing::info!(title = %notice.title, description = ?notice.description, "Notice")
            }
            Severity::Destructive => {
                tracing::warn!(title = %notice.title, description = ?notice.description, "Notice")
            }
        }
    }
}

/// Keeps every notice for later inspection. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.lock().push(notice);
    }
}

/// Keeps every confirmation prompt shown. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingConfirmer {
    prompts: Arc<Mutex<Vec<ConfirmPrompt>>>,
}

impl RecordingConfirmer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Confirmer for RecordingConfirmer {
    fn confirm(&self, prompt: ConfirmPrompt) {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt);
    }
}
