//! Beatport catalog HTTP client
//!
//! Looks up a single track by id on the JSON catalog endpoint.
//! One request per track, no retries and no caching.

use std::time::Duration;

use super::domain::TrackMetadata;
use super::{adapter, dto};
use crate::error::{ConvertError, Result};
use crate::source::TrackId;

/// Catalog endpoint used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://api.beatport.com/catalog/tracks";

/// Catalog API version sent with every query
const API_VERSION: &str = "1.0";

/// User agent string sent with catalog and artwork requests
const USER_AGENT: &str = concat!("beatport2flac/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the catalog and artwork fetchers.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Catalog API client
pub struct CatalogClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the given endpoint.
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Look up a track and normalize the response.
    pub async fn lookup(&self, id: &TrackId) -> Result<TrackMetadata> {
        let response = self.send_lookup_request(id).await?;
        adapter::to_metadata(response)
    }

    /// Build the `format=json&v=1.0&id=<id>` query.
    fn lookup_request(&self, id: &TrackId) -> reqwest::Result<reqwest::Request> {
        self.http_client
            .get(&self.base_url)
            .query(&[("format", "json"), ("v", API_VERSION), ("id", id.as_str())])
            .build()
    }

    /// Send the HTTP request and parse the response
    async fn send_lookup_request(&self, id: &TrackId) -> Result<dto::CatalogResponse> {
        let request = self
            .lookup_request(id)
            .map_err(|e| ConvertError::transport(e.to_string()))?;
        tracing::debug!(url = %request.url(), "Querying catalog");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| ConvertError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::transport(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ConvertError::transport(e.to_string()))?;

        parse_response(&body)
    }
}

/// Parse a catalog response body.
pub fn parse_response(body: &str) -> Result<dto::CatalogResponse> {
    serde_json::from_str(body)
        .map_err(|e| ConvertError::transport(format!("Failed to parse catalog response: {e}")))
}
