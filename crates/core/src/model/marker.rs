//! Marker and cluster types.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A (longitude, latitude) pair in degrees.
///
/// Serialized as a two-element `[lng, lat]` array, the same order the
/// marker dataset uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// True when both components are finite and inside
    /// [-180, 180] x [-90, 90].
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Arithmetic mean of the given coordinates, or None for an empty input.
    pub fn centroid<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LngLat>,
    {
        let mut count = 0usize;
        let mut lng = 0.0;
        let mut lat = 0.0;
        for c in coords {
            lng += c.lng;
            lat += c.lat;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Self::new(lng / n, lat / n))
    }
}

impl Serialize for LngLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lng, self.lat].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LngLat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [lng, lat] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Self::new(lng, lat))
    }
}

/// Extended marker payload (contact info, facility lists, ...) fetched on
/// demand. Kept as an opaque JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerDetails(pub Map<String, Value>);

impl MarkerDetails {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for MarkerDetails {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Member list of a synthesized cluster marker.
///
/// Members are owned copies and never clusters themselves; there is no
/// back-reference from a member to its cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    members: Vec<Marker>,
}

impl Cluster {
    /// Smallest number of markers a cluster can hold.
    pub const MIN_SIZE: usize = 2;

    /// Builds a cluster from at least two non-cluster markers.
    pub fn from_members(members: Vec<Marker>) -> Option<Self> {
        if members.len() < Self::MIN_SIZE || members.iter().any(Marker::is_cluster) {
            return None;
        }
        Some(Self { members })
    }

    /// Caller guarantees at least two members, none of them clusters.
    pub(crate) fn from_bucket(members: Vec<Marker>) -> Self {
        debug_assert!(members.len() >= Self::MIN_SIZE);
        debug_assert!(!members.iter().any(Marker::is_cluster));
        Self { members }
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[Marker] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Marker> {
        self.members
    }

    pub fn centroid(&self) -> LngLat {
        LngLat::centroid(self.members.iter().map(|m| &m.coordinates)).unwrap_or_default()
    }
}

/// A geolocated point of interest, or a synthetic cluster of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    /// Category tag, serialized as `type`.
    pub kind: String,
    pub coordinates: LngLat,
    pub description: Option<String>,
    /// Absent until lazily loaded.
    pub details: Option<MarkerDetails>,
    cluster: Option<Cluster>,
}

impl Marker {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, coordinates: LngLat) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            coordinates,
            description: None,
            details: None,
            cluster: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_details(mut self, details: MarkerDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Synthesizes a cluster marker placed at the centroid of `cluster`.
    pub fn from_cluster(id: impl Into<String>, kind: impl Into<String>, cluster: Cluster) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            coordinates: cluster.centroid(),
            description: None,
            details: None,
            cluster: Some(cluster),
        }
    }

    pub fn is_cluster(&self) -> bool {
        self.cluster.is_some()
    }

    pub fn cluster(&self) -> Option<&Cluster> {
        self.cluster.as_ref()
    }

    /// Member count; only present for cluster markers and always >= 2.
    pub fn cluster_size(&self) -> Option<usize> {
        self.cluster.as_ref().map(Cluster::size)
    }

    pub fn cluster_members(&self) -> Option<&[Marker]> {
        self.cluster.as_ref().map(Cluster::members)
    }

    pub fn has_details(&self) -> bool {
        self.details.is_some()
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Marker", 8)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("coordinates", &self.coordinates)?;
        match &self.description {
            Some(description) => state.serialize_field("description", description)?,
            None => state.skip_field("description")?,
        }
        match &self.details {
            Some(details) => state.serialize_field("details", details)?,
            None => state.skip_field("details")?,
        }
        state.serialize_field("isCluster", &self.is_cluster())?;
        match &self.cluster {
            Some(cluster) => {
                state.serialize_field("clusterSize", &cluster.size())?;
                state.serialize_field("clusterMembers", cluster.members())?;
            }
            None => {
                state.skip_field("clusterSize")?;
                state.skip_field("clusterMembers")?;
            }
        }
        state.end()
    }
}
