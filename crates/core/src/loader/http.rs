//! HTTP detail source.
//!
//! Resolves `GET <base_url>/<id>` to a JSON object. Transport errors,
//! non-2xx statuses and non-object bodies all come back as `FetchError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::source::DetailSource;
use crate::error::{FetchError, MapError, Result};
use crate::model::MarkerDetails;

#[derive(Debug, Clone)]
pub struct HttpDetailSource {
    client: Client,
    base_url: Url,
}

impl HttpDetailSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| MapError::InvalidParam {
            name: "details_url",
            msg: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(MapError::InvalidParam {
                name: "details_url",
                msg: format!("{base_url} cannot be used as a base url"),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MapError::HttpClient(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Lookup url for `id`; the id is percent-encoded as one path segment.
    pub fn detail_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }
}

#[async_trait]
impl DetailSource for HttpDetailSource {
    async fn fetch_details(&self, id: &str) -> std::result::Result<MarkerDetails, FetchError> {
        let url = self.detail_url(id);
        tracing::debug!(%url, "fetching marker details");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Decode(e.to_string())
            }
        })?;
        details_from_value(body)
    }
}

/// Accepts only a JSON object as a detail payload.
pub fn details_from_value(value: Value) -> std::result::Result<MarkerDetails, FetchError> {
    match value {
        Value::Object(fields) => Ok(MarkerDetails::new(fields)),
        other => Err(FetchError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(e.to_string())
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
