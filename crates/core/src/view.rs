//! Map session: owns the dataset, the marker cache and the current
//! selection for as long as a map view is mounted.
//!
//! The cache lives exactly as long as the view. Dropping or unmounting the
//! view clears it, even if another owner still holds the `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{MarkerCache, MarkerStore};
use crate::cluster::{CellQuantizer, GridClusterer, PowerOfTwoGrid};
use crate::error::{MapError, Result};
use crate::filter::filter_to_bounds;
use crate::loader::{DetailLoader, DetailSource};
use crate::model::{Marker, Viewport, ViewportChange};
use crate::params::EngineParams;
use crate::perf::PerformanceMonitor;

const PASS_LABEL: &str = "filter+cluster";

/// Result of a marker selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No newer selection started while this one was loading; it is now the
    /// view's selected marker.
    Current(Marker),
    /// A newer selection started first. The loaded marker is still returned
    /// (and cached) but the view's selection was left alone.
    Superseded(Marker),
}

impl Selection {
    pub fn marker(&self) -> &Marker {
        match self {
            Selection::Current(m) | Selection::Superseded(m) => m,
        }
    }

    pub fn into_marker(self) -> Marker {
        match self {
            Selection::Current(m) | Selection::Superseded(m) => m,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, Selection::Current(_))
    }
}

/// A mounted map view.
pub struct MapView<S, Q = PowerOfTwoGrid> {
    markers: Vec<Marker>,
    params: EngineParams,
    clusterer: GridClusterer<Q>,
    monitor: PerformanceMonitor,
    loader: DetailLoader<S, MarkerCache>,
    viewport: Option<Viewport>,
    generation: AtomicU64,
    selected: Mutex<Option<Marker>>,
}

impl<S: DetailSource> MapView<S> {
    /// Mounts a view over `markers` with a fresh, empty cache.
    pub fn mount(markers: Vec<Marker>, params: EngineParams, source: S) -> Self {
        let clusterer = GridClusterer::new(params.max_cluster_zoom);
        Self::mount_with_clusterer(markers, params, source, clusterer)
    }
}

impl<S: DetailSource, Q: CellQuantizer> MapView<S, Q> {
    pub fn mount_with_clusterer(
        markers: Vec<Marker>,
        params: EngineParams,
        source: S,
        clusterer: GridClusterer<Q>,
    ) -> Self {
        tracing::debug!(markers = markers.len(), "mounting map view");
        Self {
            markers,
            monitor: PerformanceMonitor::new(params.frame_budget),
            params,
            clusterer,
            loader: DetailLoader::new(source, Arc::new(MarkerCache::new())),
            viewport: None,
            generation: AtomicU64::new(0),
            selected: Mutex::new(None),
        }
    }

    /// Replaces the pass monitor, e.g. to attach a budget hook.
    pub fn with_monitor(mut self, monitor: PerformanceMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn cache(&self) -> &Arc<MarkerCache> {
        self.loader.cache()
    }

    /// Last viewport seen by [`MapView::on_viewport_change`].
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Runs one filter+cluster pass for `viewport`.
    pub fn visible_markers(&self, viewport: &Viewport) -> Vec<Marker> {
        let timer = self.monitor.start(PASS_LABEL);
        let in_view = filter_to_bounds(&self.markers, &viewport.bounds);
        let in_view_count = in_view.len();
        let out = self.clusterer.cluster(in_view, viewport.zoom);
        let elapsed_ms = timer.end();

        tracing::debug!(
            zoom = viewport.zoom,
            in_view = in_view_count,
            rendered = out.len(),
            clusters = out.iter().filter(|m| m.is_cluster()).count(),
            elapsed_ms,
            "viewport pass"
        );
        out
    }

    /// Handles a camera move from the rendering surface.
    pub fn on_viewport_change(&mut self, change: &ViewportChange) -> Vec<Marker> {
        let viewport = change.to_viewport(self.params.bounds_offset);
        self.viewport = Some(viewport);
        self.visible_markers(&viewport)
    }

    /// Loads details for `marker` and makes it the selected marker unless a
    /// newer selection started while it was loading.
    pub async fn select(&self, marker: &Marker) -> Selection {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let loaded = self.loader.load(marker).await;

        let mut selected = self.lock_selected();
        if self.generation.load(Ordering::SeqCst) == generation {
            *selected = Some(loaded.clone());
            Selection::Current(loaded)
        } else {
            tracing::debug!(marker = %marker.id, "selection superseded by a newer one");
            Selection::Superseded(loaded)
        }
    }

    /// Looks up a dataset marker by id and selects it.
    pub async fn select_by_id(&self, id: &str) -> Result<Selection> {
        let marker = self
            .markers
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MapError::MarkerNotFound(id.to_string()))?;
        Ok(self.select(&marker).await)
    }

    pub fn selected(&self) -> Option<Marker> {
        self.lock_selected().clone()
    }

    pub fn clear_selection(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.lock_selected() = None;
    }

    /// Tears the view down, clearing the marker cache.
    pub fn unmount(self) {}

    fn lock_selected(&self) -> MutexGuard<'_, Option<Marker>> {
        self.selected.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, Q> Drop for MapView<S, Q> {
    fn drop(&mut self) {
        self.loader.cache().clear();
        tracing::debug!("map view unmounted, marker cache cleared");
    }
}
