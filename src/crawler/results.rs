//! ResultStore: per-title link counts and per-URL fetch failures
//!
//! Pages are keyed by title, not URL. Two pages with the same title share
//! one entry and the most recent write wins.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A URL whose fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<String, usize>,
    failures: Vec<FetchFailure>,
    records: usize,
}

/// Thread-safe accumulator of crawl results
#[derive(Debug, Default)]
pub struct ResultStore {
    inner: Mutex<Inner>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the link count for `title`
    ///
    /// Returns the count this write replaced, if the title was already present.
    pub fn record(&self, title: &str, link_count: usize) -> Option<usize> {
        let mut inner = self.lock();
        inner.records += 1;
        inner.pages.insert(title.to_string(), link_count)
    }

    /// Records a failed fetch
    pub fn record_failure(&self, url: &str, reason: impl Into<String>) {
        self.lock().failures.push(FetchFailure {
            url: url.to_string(),
            reason: reason.into(),
        });
    }

    /// Number of [`record`](Self::record) calls, collisions included
    ///
    /// One per successfully parsed page.
    pub fn records(&self) -> usize {
        self.lock().records
    }

    /// Copies out the title → link count map, sorted by title
    pub fn snapshot(&self) -> BTreeMap<String, usize> {
        self.lock()
            .pages
            .iter()
            .map(|(title, count)| (title.clone(), *count))
            .collect()
    }

    /// Copies out the recorded failures in the order they happened
    pub fn failures(&self) -> Vec<FetchFailure> {
        self.lock().failures.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_record() {
        let store = ResultStore::new();
        assert_eq!(store.record("Home", 2), None);
        assert_eq!(store.snapshot().get("Home"), Some(&2));
        assert_eq!(store.records(), 1);
    }

    #[test]
    fn test_same_title_last_write_wins() {
        let store = ResultStore::new();
        store.record("Home", 2);
        assert_eq!(store.record("Home", 0), Some(2));

        let pages = store.snapshot();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages.get("Home"), Some(&0));
        assert_eq!(store.records(), 2);
    }

    #[test]
    fn test_empty_title_is_a_key() {
        let store = ResultStore::new();
        store.record("", 3);
        assert_eq!(store.snapshot().get(""), Some(&3));
    }

    #[test]
    fn test_failures_are_kept_separately() {
        let store = ResultStore::new();
        store.record_failure("https://b.test/", "HTTP 500");

        assert!(store.snapshot().is_empty());
        assert_eq!(store.records(), 0);
        assert_eq!(
            store.failures(),
            vec![FetchFailure {
                url: "https://b.test/".to_string(),
                reason: "HTTP 500".to_string(),
            }]
        );
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let store = ResultStore::new();
        store.record("b", 1);
        store.record("a", 2);
        store.record("c", 3);

        let keys: Vec<_> = store.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_concurrent_records() {
        let store = Arc::new(ResultStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        store.record(&format!("t{}-{}", t, i), i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.snapshot().len(), 800);
        assert_eq!(store.records(), 800);
    }
}
