//! Id-indexed marker memoization.
//!
//! Holds markers whose details have been fetched so a re-selection does not
//! hit the network again. Owned by a map session, never process-global.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use crate::model::Marker;

/// Key/value store of markers by id.
///
/// All operations are synchronous. Implementations must be safe to share
/// across tasks; eviction policy is up to the implementation.
pub trait MarkerStore: Send + Sync {
    fn get(&self, id: &str) -> Option<Marker>;
    fn has(&self, id: &str) -> bool;
    /// Stores `marker` under `id`, replacing any previous entry.
    fn set(&self, id: &str, marker: Marker);
    fn clear(&self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded marker cache. Entries live until [`MarkerStore::clear`] or
/// until the cache is dropped.
#[derive(Debug, Default)]
pub struct MarkerCache {
    entries: Mutex<FxHashMap<String, Marker>>,
}

impl MarkerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids currently cached, in arbitrary order.
    pub fn ids(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    // Every critical section is a single map operation, so a poisoned lock
    // still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, FxHashMap<String, Marker>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MarkerStore for MarkerCache {
    fn get(&self, id: &str) -> Option<Marker> {
        self.lock().get(id).cloned()
    }

    fn has(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    fn set(&self, id: &str, marker: Marker) {
        self.lock().insert(id.to_string(), marker);
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
