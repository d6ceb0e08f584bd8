//! Request lifecycle tracking
//!
//! A reference-counted busy flag: "at least one request is in flight".
//! The counter is the only stored value; the flag is derived from it on
//! every read so the two can never drift apart.

use std::sync::Arc;
use tokio::sync::watch;

/// Counts in-flight requests
///
/// Cloning is cheap and every clone shares the same counter, so one tracker
/// can be handed to the interceptor and to any number of observers.
#[derive(Debug, Clone)]
pub struct LoadingTracker {
    count: Arc<watch::Sender<usize>>,
}

impl Default for LoadingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingTracker {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self {
            count: Arc::new(count),
        }
    }

    /// One more request in flight
    pub fn start(&self) {
        self.count.send_modify(|count| *count += 1);
    }

    /// One request finished; extra calls beyond `start` are absorbed
    pub fn stop(&self) {
        self.count.send_if_modified(|count| {
            if *count == 0 {
                return false;
            }
            *count -= 1;
            true
        });
    }

    /// Force the counter back to zero
    pub fn reset(&self) {
        self.count.send_if_modified(|count| {
            let changed = *count != 0;
            *count = 0;
            changed
        });
    }

    pub fn is_loading(&self) -> bool {
        *self.count.borrow() > 0
    }

    /// Number of requests currently in flight
    pub fn in_flight(&self) -> usize {
        *self.count.borrow()
    }

    /// Start tracking a request; the returned guard stops it on drop
    ///
    /// Dropping the guard covers success, failure and cancellation alike,
    /// which keeps start/stop strictly paired.
    pub fn begin(&self) -> LoadingGuard {
        self.start();
        LoadingGuard {
            tracker: self.clone(),
        }
    }

    /// Observe the busy flag
    pub fn subscribe(&self) -> LoadingWatch {
        let rx = self.count.subscribe();
        let last = *rx.borrow() > 0;
        LoadingWatch { rx, last }
    }
}

/// Stops the tracked request when dropped
#[derive(Debug)]
pub struct LoadingGuard {
    tracker: LoadingTracker,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.tracker.stop();
    }
}

/// Subscriber that only wakes up when the busy flag flips
#[derive(Debug)]
pub struct LoadingWatch {
    rx: watch::Receiver<usize>,
    last: bool,
}

impl LoadingWatch {
    pub fn is_loading(&self) -> bool {
        *self.rx.borrow() > 0
    }

    /// Wait until the busy flag differs from the last observed value
    ///
    /// Returns `None` once every tracker clone has been dropped.
    pub async fn changed(&mut self) -> Option<bool> {
        loop {
            self.rx.changed().await.ok()?;
            let now = *self.rx.borrow_and_update() > 0;
            if now != self.last {
                self.last = now;
                return Some(now);
            }
        }
    }
}
