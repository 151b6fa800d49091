//! Rendered-page cache keyed by request path

use crate::core::events::{CacheInvalidator, EventBus};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Entries {
    pages: HashMap<String, String>,
    /// Bumped on every revalidation of a path
    versions: HashMap<String, u64>,
}

/// Token taken before rendering a page; storing with a stale token is a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStamp(u64);

/// In-process cache of rendered HTML
///
/// A page rendered from data read before a revalidation is never stored after
/// it: callers take a [`CacheStamp`] before reading and [`PageCache::store`]
/// drops the page if the path was revalidated in between.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: RwLock<Entries>,
    bus: Option<EventBus>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also broadcast every revalidation on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn event_bus(&self) -> Option<&EventBus> {
        self.bus.as_ref()
    }

    pub fn get(&self, path: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.pages.get(path).cloned()
    }

    pub fn stamp(&self, path: &str) -> CacheStamp {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        CacheStamp(entries.versions.get(path).copied().unwrap_or(0))
    }

    /// Store `html` for `path` unless the path was revalidated since `stamp`.
    /// Returns whether the page was stored.
    pub fn store(&self, path: &str, html: String, stamp: CacheStamp) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let current = entries.versions.get(path).copied().unwrap_or(0);
        if current != stamp.0 {
            return false;
        }
        entries.pages.insert(path.to_string(), html);
        true
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheInvalidator for PageCache {
    fn revalidate_path(&self, path: &str) {
        {
            let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
            entries.pages.remove(path);
            *entries.versions.entry(path.to_string()).or_insert(0) += 1;
        }
        tracing::debug!(path, "page cache entry evicted");

        if let Some(bus) = &self.bus {
            bus.revalidate_path(path);
        }
    }
}
