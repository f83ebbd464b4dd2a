// HighlightWizard - app/worker.rs
//
// Background load/classify for interactive front ends. Runs the synchronous
// `EventStore` on a worker thread and reports progress over an mpsc channel,
// so the caller's thread never blocks on file I/O.
//
// Architecture:
//   - `LoadManager` lives on the caller's thread; `run_load` runs on a
//     background thread with its own `EventStore`.
//   - An `Arc<AtomicBool>` cancel flag lets the caller abandon a load; it is
//     checked between the load and classify phases.
//   - All cross-thread communication is via `LoadProgress` channel messages.

use crate::app::store::EventStore;
use crate::core::highlight::HighlightRule;
use crate::core::model::LoadProgress;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

/// Manages a load operation on a background thread.
pub struct LoadManager {
    /// Channel receiver for the owner to poll progress messages.
    progress_rx: Option<mpsc::Receiver<LoadProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl LoadManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start loading `path` and classifying it with `rule`.
    ///
    /// Spawns a background thread immediately; progress is sent over the channel.
    /// If a load is already running it is cancelled first.
    pub fn start_load(&mut self, path: PathBuf, rule: Box<dyn HighlightRule>) {
        self.cancel_load();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        std::thread::spawn(move || {
            run_load(path, rule, tx, cancel);
        });

        tracing::debug!("Background load started");
    }

    /// Request cancellation of the running load.
    /// The background thread will send `LoadProgress::Cancelled` and exit.
    pub fn cancel_load(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
    }

    /// Poll for progress messages without blocking. Returns all pending messages.
    pub fn poll_progress(&self) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while let Ok(msg) = rx.try_recv() {
                messages.push(msg);
            }
        }
        messages
    }

    /// Block until a terminal message arrives or `timeout` elapses.
    ///
    /// Returns every message received, terminal one last. The list ends with
    /// a non-terminal message only on timeout or if the worker vanished.
    pub fn wait_for_outcome(&self, timeout: Duration) -> Vec<LoadProgress> {
        let mut messages = Vec::new();
        let Some(ref rx) = self.progress_rx else {
            return messages;
        };
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(msg) => {
                    let done = msg.is_terminal();
                    messages.push(msg);
                    if done {
                        break;
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    tracing::warn!(?timeout, "Timed out waiting for background load");
                    break;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
        messages
    }
}

impl Default for LoadManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Load → classify pipeline. Runs on a background thread.
fn run_load(
    path: PathBuf,
    rule: Box<dyn HighlightRule>,
    tx: mpsc::Sender<LoadProgress>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                return; // Receiver dropped; exit quietly.
            }
        };
    }

    macro_rules! check_cancel {
        () => {
            if cancel.load(Ordering::SeqCst) {
                send!(LoadProgress::Cancelled);
                return;
            }
        };
    }

    send!(LoadProgress::Started {
        source_name: path.display().to_string(),
    });

    let mut store = EventStore::with_rule(rule);
    let records = match store.load(&path) {
        Ok(records) => records.to_vec(),
        Err(e) => {
            tracing::error!(error = %e, "Background load failed");
            send!(LoadProgress::Failed {
                error: e.to_string(),
            });
            return;
        }
    };

    for warning in store.warnings() {
        send!(LoadProgress::Warning {
            warning: warning.clone(),
        });
    }

    let summary = store.last_summary().cloned().unwrap_or_default();
    send!(LoadProgress::Loaded { records, summary });

    check_cancel!();

    let highlights = store.classify().to_vec();
    send!(LoadProgress::Classified { highlights });
}
