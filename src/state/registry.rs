//! At-most-once URL claiming
//!
//! One registry is shared between link discovery and asset downloads, so a
//! URL reachable as both a page and an asset is only ever fetched once,
//! under whichever role claims it first.

use std::collections::HashSet;
use std::sync::Mutex;

/// Mutex-guarded set of URLs already claimed for processing.
///
/// The only operation is [`claim`](VisitedRegistry::claim): membership test
/// and insertion are a single atomic step, so two workers can never both
/// win the same URL. There is deliberately no separate `contains`/`insert`
/// surface.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    inner: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically tests membership and inserts if absent. Returns true only
    /// if this call performed the insertion, i.e. the caller is the unique
    /// claimant of `url`.
    pub fn claim(&self, url: &str) -> bool {
        self.inner.lock().unwrap().insert(url.to_string())
    }

    /// Number of URLs claimed so far.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
