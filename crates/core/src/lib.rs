//! waypost - viewport culling, grid clustering and lazy detail loading for
//! interactive map markers.
//!
//! A pass over the marker set runs [`filter::filter_to_bounds`] and then
//! [`cluster::GridClusterer::cluster`], timed by [`perf::PerformanceMonitor`].
//! Selecting a marker goes through [`loader::DetailLoader`], which memoizes
//! fetched details in a [`cache::MarkerCache`] owned by the mounted
//! [`view::MapView`].

pub mod cache;
pub mod cluster;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod params;
pub mod perf;
pub mod view;

pub use cache::{MarkerCache, MarkerStore};
pub use cluster::GridClusterer;
pub use error::{FetchError, MapError, Result};
pub use filter::filter_to_bounds;
pub use loader::{DetailLoader, DetailSource};
pub use model::{Bounds, Cluster, LngLat, Marker, MarkerDetails, Viewport, ViewportChange};
pub use params::EngineParams;
pub use perf::PerformanceMonitor;
pub use view::{MapView, Selection};
