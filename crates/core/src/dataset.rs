//! Raw marker dataset ingestion.
//!
//! The dataset is a JSON array of
//! `{ "id", "type", "coordinates": [lng, lat], "description"? }` records,
//! loaded once per map session.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::model::{LngLat, Marker};

/// One record of the input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: LngLat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<MarkerRecord> for Marker {
    fn from(record: MarkerRecord) -> Self {
        let marker = Marker::new(record.id, record.kind, record.coordinates);
        match record.description {
            Some(description) => marker.with_description(description),
            None => marker,
        }
    }
}

/// Outcome of loading a dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub markers: Vec<Marker>,
    /// Ids of records dropped for invalid coordinates.
    pub skipped: Vec<String>,
}

/// Converts records to markers.
///
/// Records with non-finite or out-of-range coordinates are skipped with a
/// warning. A repeated id is an error.
pub fn markers_from_records(records: Vec<MarkerRecord>) -> Result<Dataset> {
    let mut seen = FxHashSet::default();
    let mut dataset = Dataset {
        markers: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };

    for record in records {
        if !seen.insert(record.id.clone()) {
            return Err(MapError::DuplicateId(record.id));
        }
        if !record.coordinates.is_valid() {
            tracing::warn!(
                marker = %record.id,
                lng = record.coordinates.lng,
                lat = record.coordinates.lat,
                "skipping marker with invalid coordinates"
            );
            dataset.skipped.push(record.id);
            continue;
        }
        dataset.markers.push(record.into());
    }
    Ok(dataset)
}

/// Parses a JSON dataset from a reader.
pub fn load_markers<R: Read>(reader: R) -> Result<Dataset> {
    let records: Vec<MarkerRecord> = serde_json::from_reader(reader)?;
    markers_from_records(records)
}

/// Parses a JSON dataset file.
pub fn load_markers_from_path(path: impl AsRef<Path>) -> Result<Dataset> {
    let file = File::open(path.as_ref())?;
    load_markers(BufReader::new(file))
}
