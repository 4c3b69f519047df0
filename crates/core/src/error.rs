//! Error types for the waypost marker engine.

use thiserror::Error;

/// Primary error type for fallible engine operations.
///
/// The filter/cluster pipeline itself never fails; this covers dataset
/// ingestion, parameter validation and client construction.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed marker dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("duplicate marker id: {0}")]
    DuplicateId(String),

    #[error("invalid parameter {name}: {msg}")]
    InvalidParam { name: &'static str, msg: String },

    #[error("http client error: {0}")]
    HttpClient(String),

    #[error("marker not found: {0}")]
    MarkerNotFound(String),
}

/// Failure of a single marker-detail lookup.
///
/// Every variant is treated the same by the detail loader: no details
/// available, keep the original marker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("detail server responded with status {0}")]
    Status(u16),

    #[error("no details for marker {0}")]
    NotFound(String),

    #[error("malformed detail payload: {0}")]
    Decode(String),
}

/// Convenience Result type alias for MapError.
pub type Result<T> = std::result::Result<T, MapError>;
