//! Zoom-dependent grid clustering of markers.

pub mod grid;
pub mod quantize;

pub use grid::{CLUSTER_KIND, GridClusterer, cluster_id};
pub use quantize::{CellKey, CellQuantizer, PowerOfTwoGrid, grid_resolution};
