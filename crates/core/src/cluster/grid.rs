//! Grid clustering.
//!
//! Markers are bucketed by grid cell; every bucket with two or more markers
//! collapses into one synthetic cluster marker at the bucket centroid.

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

use super::quantize::{CellKey, CellQuantizer, PowerOfTwoGrid};
use crate::model::{Cluster, Marker};
use crate::params::DEFAULT_MAX_CLUSTER_ZOOM;

/// Category tag carried by synthesized cluster markers.
pub const CLUSTER_KIND: &str = "cluster";

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Bucket slot. Incoming cluster markers get a slot of their own so they
/// are never merged again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Cell(CellKey),
    Fixed(usize),
}

/// Single-level grid clusterer.
#[derive(Debug, Clone)]
pub struct GridClusterer<Q = PowerOfTwoGrid> {
    max_cluster_zoom: f64,
    quantizer: Q,
}

impl Default for GridClusterer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CLUSTER_ZOOM)
    }
}

impl GridClusterer {
    pub fn new(max_cluster_zoom: f64) -> Self {
        Self::with_quantizer(max_cluster_zoom, PowerOfTwoGrid)
    }
}

impl<Q: CellQuantizer> GridClusterer<Q> {
    pub fn with_quantizer(max_cluster_zoom: f64, quantizer: Q) -> Self {
        Self {
            max_cluster_zoom,
            quantizer,
        }
    }

    pub fn max_cluster_zoom(&self) -> f64 {
        self.max_cluster_zoom
    }

    /// True when `zoom` is low enough for clustering to apply.
    pub fn clusters_at(&self, zoom: f64) -> bool {
        zoom < self.max_cluster_zoom
    }

    /// Merges markers sharing a grid cell into cluster markers.
    ///
    /// At or above the configured threshold the input is returned as is.
    /// Single-member cells pass through unchanged. Buckets are emitted in the
    /// order their first marker was seen, so the output is deterministic for
    /// a given input, but callers should not rely on any particular order.
    pub fn cluster(&self, markers: Vec<Marker>, zoom: f64) -> Vec<Marker> {
        if !self.clusters_at(zoom) {
            return markers;
        }

        let mut buckets: FxIndexMap<Slot, Vec<Marker>> = FxIndexMap::default();
        for (idx, marker) in markers.into_iter().enumerate() {
            let slot = if marker.is_cluster() {
                Slot::Fixed(idx)
            } else {
                Slot::Cell(self.quantizer.cell(marker.coordinates, zoom))
            };
            buckets.entry(slot).or_default().push(marker);
        }

        let mut out = Vec::with_capacity(buckets.len());
        for (slot, members) in buckets {
            match slot {
                Slot::Cell((row, col)) if members.len() >= Cluster::MIN_SIZE => {
                    out.push(Marker::from_cluster(
                        cluster_id(row, col, zoom),
                        CLUSTER_KIND,
                        Cluster::from_bucket(members),
                    ));
                }
                _ => out.extend(members),
            }
        }
        out
    }
}

/// Stable id for the cluster occupying cell (row, col) at `zoom`.
pub fn cluster_id(row: i64, col: i64, zoom: f64) -> String {
    format!("cluster:{row}:{col}@{zoom}")
}
