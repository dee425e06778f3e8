//! Frontier: the FIFO queue of URLs awaiting fetch
//!
//! Uniqueness is not enforced here; the visited set decides which dequeued
//! URLs are actually fetched, so duplicates may sit in the queue for a while.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

/// Thread-safe FIFO queue of URLs
///
/// Every operation takes the internal lock for the duration of that
/// operation only, so the global dequeue order across all callers is the
/// enqueue order.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: Mutex<VecDeque<String>>,
    arrivals: Notify,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `url` to the tail
    ///
    /// Empty URLs are ignored. Returns true if the URL was queued.
    pub fn enqueue(&self, url: impl Into<String>) -> bool {
        let url = url.into();
        if url.is_empty() {
            return false;
        }

        self.lock().push_back(url);
        self.arrivals.notify_one();
        true
    }

    /// Removes and returns the head of the queue, or None when it is empty
    pub fn dequeue(&self) -> Option<String> {
        self.lock().pop_front()
    }

    /// Returns the number of queued URLs
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Waits up to `timeout` for an enqueue to happen
    ///
    /// Returns true if woken by an arrival. A wakeup does not guarantee the
    /// caller will win the next dequeue.
    pub async fn wait_for_arrival(&self, timeout: Duration) -> bool {
        tokio::time::timeout(timeout, self.arrivals.notified())
            .await
            .is_ok()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        // A panic while holding the lock cannot leave the deque half-updated.
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
