//! Viewport culling.
//!
//! Reduces the full marker set to the markers inside the current viewport
//! rectangle before any clustering happens.

use crate::model::{Bounds, Marker};

/// Returns copies of the markers whose coordinates lie inside `bounds`.
///
/// Bounds are inclusive on all four sides. Input order is preserved and the
/// input slice is left untouched.
pub fn filter_to_bounds(markers: &[Marker], bounds: &Bounds) -> Vec<Marker> {
    markers
        .iter()
        .filter(|m| bounds.contains(m.coordinates))
        .cloned()
        .collect()
}
