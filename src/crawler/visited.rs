//! VisitedSet: URLs that some worker has claimed
//!
//! Membership only grows. Once a URL is in the set, no worker fetches it again.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Thread-safe, add-only set of claimed URLs
#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url` for the caller
    ///
    /// Check and insert happen under one lock acquisition: of any number of
    /// concurrent calls for the same URL, exactly one returns true.
    pub fn claim(&self, url: &str) -> bool {
        let mut claimed = self.lock();
        if claimed.contains(url) {
            return false;
        }
        claimed.insert(url.to_string())
    }

    /// Returns true if `url` has been claimed
    ///
    /// Only a hint for skipping obviously stale work; the answer may be
    /// outdated by the time the caller acts on it. Use [`claim`](Self::claim)
    /// to take ownership of a URL.
    pub fn is_claimed(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Returns the number of claimed URLs
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.claimed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
