//! Auto-dismiss timers for transient notices.
//!
//! # Responsibility
//! - Run a close callback once after a delay (success banner, redirect after
//!   a saved form).
//! - Let the owner cancel early so no callback fires against a closed view.
//!
//! # Invariants
//! - The callback runs at most once.
//! - After `cancel()` returns or the timer is dropped, the callback has
//!   either already finished or will never run.

use log::debug;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Cancellable one-shot scheduled callback.
pub struct DismissTimer {
    cancel_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DismissTimer {
    /// Schedules `on_dismiss` to run once `delay` elapses.
    pub fn schedule<F>(delay: Duration, on_dismiss: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            // Either a cancel message or a dropped sender means "closed early".
            if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                debug!("event=notice_dismiss module=notice status=fired");
                on_dismiss();
            }
        });

        Self {
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    /// Whether the callback has neither fired nor been cancelled yet.
    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancels the pending callback and waits for the timer thread to exit.
    pub fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("event=notice_dismiss module=notice status=cancelled");
        }
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::DismissTimer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn fires_once_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = DismissTimer::schedule(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(200));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!timer.is_pending());
    }

    #[test]
    fn cancel_prevents_callback() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let mut timer = DismissTimer::schedule(Duration::from_secs(30), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(timer.is_pending());
        timer.cancel();
        assert!(!timer.is_pending());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_cancels_pending_callback() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        drop(DismissTimer::schedule(Duration::from_secs(30), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
