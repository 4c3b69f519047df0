//! Data model: markers, clusters and viewports.

pub mod marker;
pub mod viewport;

pub use marker::{Cluster, LngLat, Marker, MarkerDetails};
pub use viewport::{Bounds, DEFAULT_BOUNDS_OFFSET, Viewport, ViewportChange};
