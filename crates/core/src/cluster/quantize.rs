//! Grid cell quantization.
//!
//! The clusterer only needs a function from (coordinate, zoom) to a cell
//! key; anything that groups nearby points into the same key can be
//! plugged in here.

use crate::model::LngLat;

/// Integer grid cell: (row, column), i.e. quantized (lat, lng).
pub type CellKey = (i64, i64);

/// Maps a coordinate at a given zoom level to a grid cell.
pub trait CellQuantizer {
    fn cell(&self, point: LngLat, zoom: f64) -> CellKey;
}

/// Cells per degree at `zoom`: `2^zoom`.
#[inline]
pub fn grid_resolution(zoom: f64) -> f64 {
    zoom.exp2()
}

/// Uniform degree grid with `2^zoom` cells per degree on both axes.
///
/// Cell size is not scaled to meters per pixel, so the real-world cluster
/// radius shrinks towards the poles along the longitude axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerOfTwoGrid;

impl CellQuantizer for PowerOfTwoGrid {
    #[inline]
    fn cell(&self, point: LngLat, zoom: f64) -> CellKey {
        debug_assert!(
            point.lat.is_finite() && point.lng.is_finite(),
            "non-finite marker coordinate ({}, {})",
            point.lng,
            point.lat
        );
        let resolution = grid_resolution(zoom);
        (
            (point.lat * resolution).floor() as i64,
            (point.lng * resolution).floor() as i64,
        )
    }
}

impl<F> CellQuantizer for F
where
    F: Fn(LngLat, f64) -> CellKey,
{
    fn cell(&self, point: LngLat, zoom: f64) -> CellKey {
        self(point, zoom)
    }
}
