//! Viewport rectangle and the viewport-change event it is derived from.

use serde::{Deserialize, Serialize};

use super::marker::LngLat;

/// Half-width and half-height, in degrees, of the rectangle derived from a
/// map center. Independent of zoom and screen aspect ratio.
pub const DEFAULT_BOUNDS_OFFSET: f64 = 0.02;

/// Rectangular lat/lng region, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Rectangle spanning `offset` degrees on each side of `center`.
    pub fn around(center: LngLat, offset: f64) -> Self {
        Self {
            north: center.lat + offset,
            south: center.lat - offset,
            east: center.lng + offset,
            west: center.lng - offset,
        }
    }

    #[inline]
    pub fn contains(&self, point: LngLat) -> bool {
        self.south <= point.lat
            && point.lat <= self.north
            && self.west <= point.lng
            && point.lng <= self.east
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(
            (self.east + self.west) / 2.0,
            (self.north + self.south) / 2.0,
        )
    }
}

/// The visible region of the map plus its zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: Bounds,
    pub zoom: f64,
}

impl Viewport {
    pub const fn new(bounds: Bounds, zoom: f64) -> Self {
        Self { bounds, zoom }
    }

    pub fn from_center(center: LngLat, zoom: f64, offset: f64) -> Self {
        Self {
            bounds: Bounds::around(center, offset),
            zoom,
        }
    }
}

/// Camera state broadcast by the rendering surface when the map moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportChange {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    #[serde(default)]
    pub bearing: f64,
    #[serde(default)]
    pub pitch: f64,
}

impl ViewportChange {
    pub fn center(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }

    /// Derives the viewport rectangle. Bearing and pitch are ignored.
    pub fn to_viewport(&self, offset: f64) -> Viewport {
        Viewport::from_center(self.center(), self.zoom, offset)
    }
}
