//! Engine parameters.
//!
//! Contains EngineParams for controlling clustering, viewport derivation,
//! the frame budget and detail fetching.

use std::time::Duration;

use crate::error::{MapError, Result};
use crate::model::DEFAULT_BOUNDS_OFFSET;
use crate::perf::FRAME_BUDGET;

/// Default zoom at and above which clustering is skipped.
pub const DEFAULT_MAX_CLUSTER_ZOOM: f64 = 15.0;

/// Default timeout for a single detail lookup.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters for a map session.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParams {
    /// Zoom level at or above which markers are considered visually
    /// separated and are returned unclustered.
    pub max_cluster_zoom: f64,

    /// Half-width/half-height in degrees of the rectangle derived from a
    /// viewport-change event.
    pub bounds_offset: f64,

    /// Time allowance for one filter+cluster pass.
    pub frame_budget: Duration,

    /// Timeout applied to each detail lookup by the HTTP source.
    pub fetch_timeout: Duration,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            max_cluster_zoom: DEFAULT_MAX_CLUSTER_ZOOM,
            bounds_offset: DEFAULT_BOUNDS_OFFSET,
            frame_budget: FRAME_BUDGET,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl EngineParams {
    /// Creates parameters with the specified values.
    ///
    /// Rejects non-finite or negative zoom thresholds and offsets, and a
    /// zero fetch timeout.
    pub fn new(
        max_cluster_zoom: f64,
        bounds_offset: f64,
        frame_budget: Duration,
        fetch_timeout: Duration,
    ) -> Result<Self> {
        if !max_cluster_zoom.is_finite() || max_cluster_zoom < 0.0 {
            return Err(MapError::InvalidParam {
                name: "max_cluster_zoom",
                msg: format!("expected a finite value >= 0, got {max_cluster_zoom}"),
            });
        }
        if !bounds_offset.is_finite() || bounds_offset < 0.0 {
            return Err(MapError::InvalidParam {
                name: "bounds_offset",
                msg: format!("expected a finite value >= 0, got {bounds_offset}"),
            });
        }
        if fetch_timeout.is_zero() {
            return Err(MapError::InvalidParam {
                name: "fetch_timeout",
                msg: "must be non-zero".to_string(),
            });
        }

        Ok(Self {
            max_cluster_zoom,
            bounds_offset,
            frame_budget,
            fetch_timeout,
        })
    }
}
