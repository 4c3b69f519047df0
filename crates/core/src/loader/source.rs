//! Detail sources: where extended marker payloads come from.

use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::error::FetchError;
use crate::model::MarkerDetails;

/// By-id lookup of marker details.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_details(&self, id: &str) -> Result<MarkerDetails, FetchError>;
}

#[async_trait]
impl<T: DetailSource + ?Sized> DetailSource for Arc<T> {
    async fn fetch_details(&self, id: &str) -> Result<MarkerDetails, FetchError> {
        (**self).fetch_details(id).await
    }
}

/// Details held in memory, e.g. preloaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct MemoryDetailSource {
    details: FxHashMap<String, MarkerDetails>,
}

impl MemoryDetailSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, details: MarkerDetails) {
        self.details.insert(id.into(), details);
    }

    pub fn len(&self) -> usize {
        self.details.len()
    }

    pub fn is_empty(&self) -> bool {
        self.details.is_empty()
    }
}

impl FromIterator<(String, MarkerDetails)> for MemoryDetailSource {
    fn from_iter<I: IntoIterator<Item = (String, MarkerDetails)>>(iter: I) -> Self {
        Self {
            details: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl DetailSource for MemoryDetailSource {
    async fn fetch_details(&self, id: &str) -> Result<MarkerDetails, FetchError> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }
}
