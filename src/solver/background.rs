//! Most-recent-wins background work
//!
//! Long operations driven from an interactive loop (ranking, above all) run
//! off the control path. A `SingleFlight` hands the result of at most one
//! job back to exactly one consumer: spawning a new job supersedes the
//! previous one, whose cancel flag is raised and whose result channel is
//! orphaned, so a stale result can never reach the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Cooperative cancellation flag handed to a running job.
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Whether a newer job has superseded this one. Long jobs should check
    /// this between work units and bail out early.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle for one logical background operation with exclusive,
/// most-recent-wins semantics.
pub struct SingleFlight<T> {
    cancel: Option<Arc<AtomicBool>>,
    rx: Option<Receiver<T>>,
}

impl<T: Send + 'static> SingleFlight<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancel: None,
            rx: None,
        }
    }

    /// Start `job` on a worker thread, superseding any in-flight job.
    ///
    /// The job may return `None` (e.g. after observing cancellation) to
    /// deliver nothing. Results from superseded jobs are dropped with their
    /// orphaned channels.
    pub fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce(&CancelToken) -> Option<T> + Send + 'static,
    {
        self.cancel_current();

        let flag = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let token = CancelToken(Arc::clone(&flag));

        thread::spawn(move || {
            if let Some(result) = job(&token)
                && !token.is_cancelled()
            {
                // The receiver may already be gone; that just means we were
                // superseded after finishing.
                let _ = tx.send(result);
            }
        });

        self.cancel = Some(flag);
        self.rx = Some(rx);
    }

    /// Take the result of the newest job if it has finished.
    ///
    /// Returns at most one value per spawned job; stale jobs never deliver.
    pub fn poll(&mut self) -> Option<T> {
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(value) => {
                self.rx = None;
                self.cancel = None;
                Some(value)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                self.cancel = None;
                None
            }
        }
    }

    /// Whether a job has been spawned and not yet delivered or cancelled.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.rx.is_some()
    }

    /// Cancel the current job, if any, without starting a new one.
    pub fn cancel_current(&mut self) {
        if let Some(flag) = self.cancel.take() {
            flag.store(true, Ordering::Relaxed);
        }
        self.rx = None;
    }
}

impl<T: Send + 'static> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}
