//! cip-feeds
//!
//! Read side: pluggable feed interfaces plus HTTP implementations for the
//! municipal facility register and the disruption map.
//!
//! A feed error aborts the whole pass; callers retry on their next tick.

use std::fmt;

use async_trait::async_trait;
use cip_schemas::{DisruptionResponse, FeatureCollection};
use reqwest::Response;
use serde_json::from_slice;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Network or transport failure.
    Transport(String),
    /// Non-200 response.
    Status(u16),
    /// Body was not the expected JSON document.
    Decode(String),
    /// The upstream answered 200 with an error document.
    Api(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Transport(msg) => write!(f, "transport error: {msg}"),
            FeedError::Status(code) => write!(f, "unexpected status {code}"),
            FeedError::Decode(msg) => write!(f, "decode error: {msg}"),
            FeedError::Api(msg) => write!(f, "feed api error: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

// ---------------------------------------------------------------------------
// Feed traits
// ---------------------------------------------------------------------------

#[async_trait]
pub trait FacilityFeed: Send + Sync {
    /// Base URL; entity `source` links are derived from it.
    fn source_url(&self) -> &str;

    async fn fetch_facilities(&self) -> Result<FeatureCollection, FeedError>;
}

#[async_trait]
pub trait DisruptionFeed: Send + Sync {
    async fn fetch_disruptions(&self) -> Result<DisruptionResponse, FeedError>;
}

// ---------------------------------------------------------------------------
// HTTP implementations
// ---------------------------------------------------------------------------

async fn read_body(resp: Response) -> Result<Vec<u8>, FeedError> {
    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        return Err(FeedError::Status(status.as_u16()));
    }
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| FeedError::Transport(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Facility register client. The API key is sent in the `apikey` header;
/// never log it.
#[derive(Clone)]
pub struct FacilitiesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for FacilitiesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacilitiesClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl FacilitiesClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn list_url(&self) -> String {
        format!("{}/list", self.base_url)
    }
}

#[async_trait]
impl FacilityFeed for FacilitiesClient {
    fn source_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_facilities(&self) -> Result<FeatureCollection, FeedError> {
        let resp = self
            .http
            .get(self.list_url())
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let body = read_body(resp).await?;
        let collection: FeatureCollection =
            from_slice(&body).map_err(|e| FeedError::Decode(e.to_string()))?;

        tracing::debug!(features = collection.features.len(), "fetched facility list");
        Ok(collection)
    }
}

/// Disruption map client.
#[derive(Debug, Clone)]
pub struct DisruptionClient {
    http: reqwest::Client,
    url: String,
}

impl DisruptionClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DisruptionFeed for DisruptionClient {
    async fn fetch_disruptions(&self) -> Result<DisruptionResponse, FeedError> {
        let resp = self
            .http
            .get(&self.url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        let body = read_body(resp).await?;
        let doc: DisruptionResponse =
            from_slice(&body).map_err(|e| FeedError::Decode(e.to_string()))?;

        if let Some(msg) = doc.error.as_deref().filter(|m| !m.is_empty()) {
            return Err(FeedError::Api(msg.to_string()));
        }
        Ok(doc)
    }
}
