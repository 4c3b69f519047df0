#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use waypost_core::{DetailSource, FetchError, LngLat, Marker, MarkerDetails};

#[path = "../../benches/common/rng.rs"]
mod rng;

pub use rng::XorShift64;

pub fn marker(id: &str, lat: f64, lng: f64) -> Marker {
    Marker::new(id, "hostel", LngLat::new(lng, lat))
}

/// `count` markers scattered uniformly over the given lat/lng box.
pub fn scatter(seed: u64, count: usize, lat: (f64, f64), lng: (f64, f64)) -> Vec<Marker> {
    let mut rng = XorShift64::new(seed);
    (0..count)
        .map(|i| Marker::new(format!("m{i}"), "hostel", rng.point_in(lat, lng)))
        .collect()
}

pub fn sorted_ids(markers: &[Marker]) -> Vec<String> {
    let mut ids: Vec<String> = markers.iter().map(|m| m.id.clone()).collect();
    ids.sort();
    ids
}

pub fn details(value: Value) -> MarkerDetails {
    match value {
        Value::Object(fields) => MarkerDetails::new(fields),
        other => panic!("details must be an object, got {other}"),
    }
}

/// Detail source answering from a fixed script, recording every call.
#[derive(Default)]
pub struct ScriptedSource {
    responses: HashMap<String, Result<MarkerDetails, FetchError>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
    counter: AtomicUsize,
    numbered: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call returns `{"call": n}` with n counting from 1.
    pub fn numbered() -> Self {
        Self {
            numbered: true,
            ..Self::default()
        }
    }

    pub fn ok(mut self, id: &str, payload: Value) -> Self {
        self.responses.insert(id.to_string(), Ok(details(payload)));
        self
    }

    pub fn fail(mut self, id: &str, err: FetchError) -> Self {
        self.responses.insert(id.to_string(), Err(err));
        self
    }

    pub fn delay(mut self, id: &str, d: Duration) -> Self {
        self.delays.insert(id.to_string(), d);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DetailSource for ScriptedSource {
    async fn fetch_details(&self, id: &str) -> Result<MarkerDetails, FetchError> {
        self.calls.lock().unwrap().push(id.to_string());
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(d) = self.delays.get(id) {
            tokio::time::sleep(*d).await;
        }
        if self.numbered {
            return Ok(details(json!({ "call": n })));
        }
        self.responses
            .get(id)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(id.to_string())))
    }
}
