//! Shared visited-URL set
//!
//! `VisitedSet` is the single source of truth for which URLs a crawl run has
//! already claimed. Every exploration task goes through it; nothing else
//! touches the underlying map.

use crate::state::PageState;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Thread-safe map from URL to its [`PageState`]
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashMap<String, PageState>>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims `url` for fetching
    ///
    /// If the URL is unknown it is recorded as [`PageState::Discovered`] and
    /// `true` is returned: the caller now owns the right to fetch it. If the
    /// URL is already known in any state, nothing changes and `false` is
    /// returned.
    ///
    /// The check and the insert happen under one lock acquisition, so two
    /// tasks racing on the same URL can never both win.
    pub fn try_reserve(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains_key(url) {
            return false;
        }
        urls.insert(url.to_string(), PageState::Discovered);
        true
    }

    /// Records that fetching `url` has completed
    ///
    /// Idempotent. A URL that was never reserved is recorded as fetched.
    pub fn mark_fetched(&self, url: &str) {
        let mut urls = self.lock();
        urls.insert(url.to_string(), PageState::Fetched);
    }

    /// Returns true if `url` has been fetched
    ///
    /// Diagnostics only: coordination relies solely on [`Self::try_reserve`].
    pub fn is_fetched(&self, url: &str) -> bool {
        self.state(url) == Some(PageState::Fetched)
    }

    /// Returns the current state of `url`, if known
    pub fn state(&self, url: &str) -> Option<PageState> {
        self.lock().get(url).copied()
    }

    /// Number of known URLs (discovered or fetched)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of URLs in the fetched state
    pub fn fetched_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|state| state.is_terminal())
            .count()
    }

    /// Returns all fetched URLs, sorted
    pub fn fetched_urls(&self) -> Vec<String> {
        let mut fetched: Vec<String> = self
            .lock()
            .iter()
            .filter(|(_, state)| state.is_terminal())
            .map(|(url, _)| url.clone())
            .collect();
        fetched.sort();
        fetched
    }

    // The map only holds monotonic flags, so a panic while the lock was held
    // cannot leave it inconsistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, PageState>> {
        self.urls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
