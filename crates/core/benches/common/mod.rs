#![allow(dead_code)]

use std::env;
use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, Criterion, Throughput};
use waypost_core::{LngLat, Marker};

mod rng;

pub use rng::XorShift64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

impl BenchTier {
    pub fn from_env() -> Self {
        match env::var("WAYPOST_BENCH_TIER").as_deref() {
            Ok("full") => Self::Full,
            _ => Self::Quick,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub tier: BenchTier,
    pub seed: u64,
    pub sample_size: usize,
    pub measurement: Duration,
}

pub fn bench_config() -> BenchConfig {
    let tier = BenchTier::from_env();
    let seed = env::var("WAYPOST_BENCH_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE);
    let (sample_size, measurement) = match tier {
        BenchTier::Quick => (20, Duration::from_secs(3)),
        BenchTier::Full => (40, Duration::from_secs(8)),
    };
    BenchConfig {
        tier,
        seed,
        sample_size,
        measurement,
    }
}

pub fn configure_group<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, cfg: &BenchConfig) {
    group.sample_size(cfg.sample_size);
    group.measurement_time(cfg.measurement);
}

pub fn bench_criterion() -> Criterion {
    Criterion::default().configure_from_args()
}

pub fn markers_throughput(count: usize) -> Throughput {
    Throughput::Elements(count as u64)
}

/// Markers scattered around `center` within `spread` degrees, the way a
/// city-scale dataset bunches up.
pub fn city_markers(seed: u64, count: usize, center: LngLat, spread: f64) -> Vec<Marker> {
    let mut rng = XorShift64::new(seed);
    (0..count)
        .map(|i| Marker::new(format!("m{i}"), "hostel", rng.near(center, spread)))
        .collect()
}
