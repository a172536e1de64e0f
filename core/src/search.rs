//! Debounced search field
//!
//! Tracks the raw text of the search box on every keystroke and surfaces a
//! settled term only after the input has been quiet for the debounce
//! window. Each keystroke restarts the timer; the previous timer is aborted
//! and also invalidated by a generation counter, so a timer that already
//! woke up can never publish a stale term.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Callback receiving each newly settled term (`None` when cleared).
pub type SettleCallback = Arc<dyn Fn(Option<String>) + Send + Sync>;

#[derive(Debug, Default)]
struct SettleState {
    generation: u64,
    settled: Option<String>,
}

pub struct DebouncedSearch {
    raw: String,
    window: Duration,
    state: Arc<Mutex<SettleState>>,
    pending: Option<JoinHandle<()>>,
    on_settle: SettleCallback,
}

impl DebouncedSearch {
    /// Must be driven from inside a tokio runtime; timers are spawned tasks.
    pub fn new(window: Duration, on_settle: SettleCallback) -> Self {
        Self {
            raw: String::new(),
            window,
            state: Arc::new(Mutex::new(SettleState::default())),
            pending: None,
            on_settle,
        }
    }

    /// Debounced field that reports settled terms on a channel.
    pub fn with_channel(window: Duration) -> (Self, mpsc::UnboundedReceiver<Option<String>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let on_settle: SettleCallback = Arc::new(move |term| {
            // Receiver dropped means nobody is listing carriers anymore
            let _ = tx.send(term);
        });
        (Self::new(window, on_settle), rx)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The last term that survived the debounce window.
    pub fn settled(&self) -> Option<String> {
        lock(&self.state).settled.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Record a keystroke and restart the quiet-period timer.
    pub fn set_raw(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value == self.raw {
            return;
        }
        self.raw = value.clone();

        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.generation
        };

        let state = Arc::clone(&self.state);
        let on_settle = Arc::clone(&self.on_settle);
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;

            let term = settle_term(&value);
            {
                let mut state = lock(&state);
                if state.generation != generation || state.settled == term {
                    return;
                }
                state.settled = term.clone();
            }
            tracing::debug!(term = ?term, "Search term settled");
            on_settle(term);
        }));
    }

    /// Drop any pending timer without settling.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        lock(&self.state).generation += 1;
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Blank input settles to `None` so the list query drops the search clause.
fn settle_term(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn lock(state: &Mutex<SettleState>) -> MutexGuard<'_, SettleState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
