//! Seeded coordinate generator shared by the benches and the integration
//! tests. Runs are reproducible for a given seed.

use waypost_core::LngLat;

#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Zero is a fixed point of xorshift, so it is remapped.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        Self { state }
    }

    fn step(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[lo, hi]`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.step() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }

    /// A point inside the `lat` x `lng` box.
    pub fn point_in(&mut self, lat: (f64, f64), lng: (f64, f64)) -> LngLat {
        let la = self.uniform(lat.0, lat.1);
        let ln = self.uniform(lng.0, lng.1);
        LngLat::new(ln, la)
    }

    /// A point within `spread` degrees of `center` on both axes.
    pub fn near(&mut self, center: LngLat, spread: f64) -> LngLat {
        self.point_in(
            (center.lat - spread, center.lat + spread),
            (center.lng - spread, center.lng + spread),
        )
    }
}
