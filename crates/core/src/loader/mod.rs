//! Lazy, soft-failing detail loading.
//!
//! A marker is shown first with only its dataset fields; its extended
//! details are fetched when the user selects it. Fetch failures never reach
//! the caller: the marker comes back exactly as it went in.

pub mod http;
pub mod source;

use std::sync::Arc;

pub use http::HttpDetailSource;
pub use source::{DetailSource, MemoryDetailSource};

use crate::cache::{MarkerCache, MarkerStore};
use crate::model::Marker;

/// Fetches missing details and memoizes the merged marker.
///
/// Concurrent loads for the same id are not deduplicated; whichever fetch
/// completes last owns the cache entry.
#[derive(Debug)]
pub struct DetailLoader<S, C: ?Sized = MarkerCache> {
    source: S,
    cache: Arc<C>,
}

impl<S, C: ?Sized> DetailLoader<S, C> {
    pub fn new(source: S, cache: Arc<C>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, C> DetailLoader<S, C>
where
    S: DetailSource,
    C: MarkerStore + ?Sized,
{
    /// Returns `marker` with its details filled in.
    ///
    /// Markers that already carry details, and cluster markers, are returned
    /// as they are. A cached entry with details short-circuits the fetch.
    /// On success the merged copy is stored in the cache under the marker id.
    pub async fn load(&self, marker: &Marker) -> Marker {
        if marker.has_details() || marker.is_cluster() {
            return marker.clone();
        }
        if let Some(cached) = self.cache.get(&marker.id).filter(Marker::has_details) {
            tracing::debug!(marker = %marker.id, "marker details served from cache");
            return cached;
        }

        match self.source.fetch_details(&marker.id).await {
            Ok(details) => {
                let merged = marker.clone().with_details(details);
                self.cache.set(&marker.id, merged.clone());
                merged
            }
            Err(err) => {
                tracing::warn!(marker = %marker.id, error = %err, "failed to load marker details");
                marker.clone()
            }
        }
    }
}
