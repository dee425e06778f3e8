use crate::state::{CrawlPhase, StopReason};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shared lifecycle of one crawl
///
/// The phase only ever moves forward. The first caller to leave the Active
/// phase decides the [`StopReason`]; later requests are no-ops.
#[derive(Debug)]
pub struct CrawlLifecycle {
    phase: AtomicU8,
    reason: AtomicU8,
    changed: Notify,
}

impl CrawlLifecycle {
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(CrawlPhase::Active.as_u8()),
            reason: AtomicU8::new(0),
            changed: Notify::new(),
        }
    }

    /// Returns the current phase
    pub fn phase(&self) -> CrawlPhase {
        CrawlPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Returns true while new claims may still be made
    pub fn is_active(&self) -> bool {
        self.phase().is_active()
    }

    /// Moves Active → Draining
    ///
    /// Returns true if this call performed the transition.
    pub fn begin_draining(&self, reason: StopReason) -> bool {
        let moved = self.advance(CrawlPhase::Draining);

        if moved {
            self.reason.store(reason.as_u8(), Ordering::Release);
            tracing::info!("Crawl draining: {}", reason);
            self.changed.notify_waiters();
        }

        moved
    }

    /// Moves Draining → Terminated
    ///
    /// Returns false if the crawl was not draining.
    pub fn terminate(&self) -> bool {
        let moved = self.advance(CrawlPhase::Terminated);

        if moved {
            self.changed.notify_waiters();
        }

        moved
    }

    /// Performs one legal forward step to `next`; only one caller can win it
    fn advance(&self, next: CrawlPhase) -> bool {
        let current = self.phase();
        if !current.can_transition_to(next) {
            return false;
        }

        self.phase
            .compare_exchange(
                current.as_u8(),
                next.as_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// The reason the crawl stopped, once it has
    pub fn stop_reason(&self) -> Option<StopReason> {
        StopReason::from_u8(self.reason.load(Ordering::Acquire))
    }

    /// Waits until the phase changes (or a spurious wakeup)
    pub async fn changed(&self) {
        self.changed.notified().await;
    }
}

impl Default for CrawlLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle for requesting early shutdown of a running crawl
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    lifecycle: Arc<CrawlLifecycle>,
}

impl ShutdownHandle {
    pub(crate) fn new(lifecycle: Arc<CrawlLifecycle>) -> Self {
        Self { lifecycle }
    }

    /// Requests shutdown
    ///
    /// Workers stop claiming new URLs; fetches already issued may finish.
    /// Returns false if the crawl had already left the Active phase.
    pub fn shutdown(&self) -> bool {
        self.lifecycle.begin_draining(StopReason::Cancelled)
    }

    /// Returns the current phase of the crawl this handle belongs to
    pub fn phase(&self) -> CrawlPhase {
        self.lifecycle.phase()
    }
}
