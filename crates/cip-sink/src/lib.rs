//! cip-sink
//!
//! Write side of the pipeline: the `EntitySink` contract the reconciliation
//! engine talks to, the NGSI-LD document model, and a context-broker client.

mod client;
mod error;
pub mod ngsi;

pub use client::{ContextBrokerClient, REQUEST_TIMEOUT};
pub use error::SinkError;
pub use ngsi::{Attributes, NgsiEntity, DEFAULT_CONTEXT};

/// Idempotent entity store.
///
/// `Send + Sync` so one client can be shared across poll loops behind an
/// `Arc`.
#[async_trait::async_trait]
pub trait EntitySink: Send + Sync {
    /// Create a new entity. An entity that already exists is not an error.
    async fn create_entity(&self, entity: &NgsiEntity) -> Result<(), SinkError>;

    /// Merge attributes into an existing entity. `SinkError::NotFound` when
    /// there is nothing to merge into.
    async fn merge_entity(&self, entity_id: &str, attributes: &Attributes)
        -> Result<(), SinkError>;

    async fn delete_entity(&self, entity_id: &str) -> Result<(), SinkError>;
}
