//! HTTP client for an NGSI-LD context broker.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::ngsi::{fragment_document, Attributes, NgsiEntity};
use crate::{EntitySink, SinkError};

/// Deadline applied to every broker call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LD_JSON: &str = "application/ld+json";

#[derive(Debug, Clone)]
pub struct ContextBrokerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContextBrokerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SinkError> {
        Self::new_with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn new_with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SinkError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn entities_url(&self) -> String {
        format!("{}/ngsi-ld/v1/entities", self.base_url.trim_end_matches('/'))
    }

    fn entity_url(&self, entity_id: &str) -> String {
        format!("{}/{}", self.entities_url(), entity_id)
    }

    fn encode(doc: &Value) -> Result<Vec<u8>, SinkError> {
        serde_json::to_vec(doc).map_err(|e| SinkError::Encode(e.to_string()))
    }
}

async fn status_error(resp: Response) -> SinkError {
    let code = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    SinkError::Status { code, body }
}

fn transport(e: reqwest::Error) -> SinkError {
    SinkError::Transport(e.to_string())
}

#[async_trait]
impl EntitySink for ContextBrokerClient {
    async fn create_entity(&self, entity: &NgsiEntity) -> Result<(), SinkError> {
        let body = Self::encode(&entity.to_document())?;
        let resp = self
            .http
            .post(self.entities_url())
            .header(CONTENT_TYPE, LD_JSON)
            .body(body)
            .send()
            .await
            .map_err(transport)?;

        match resp.status() {
            StatusCode::CREATED => Ok(()),
            StatusCode::CONFLICT => {
                tracing::debug!(entity_id = %entity.id, "entity already exists");
                Ok(())
            }
            s if s.is_success() => Ok(()),
            _ => Err(status_error(resp).await),
        }
    }

    async fn merge_entity(&self, entity_id: &str, attributes: &Attributes) -> Result<(), SinkError> {
        let body = Self::encode(&fragment_document(attributes))?;
        let resp = self
            .http
            .patch(self.entity_url(entity_id))
            .header(CONTENT_TYPE, LD_JSON)
            .body(body)
            .send()
            .await
            .map_err(transport)?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(SinkError::NotFound),
            _ => Err(status_error(resp).await),
        }
    }

    async fn delete_entity(&self, entity_id: &str) -> Result<(), SinkError> {
        let resp = self
            .http
            .delete(self.entity_url(entity_id))
            .send()
            .await
            .map_err(transport)?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(SinkError::NotFound),
            _ => Err(status_error(resp).await),
        }
    }
}
