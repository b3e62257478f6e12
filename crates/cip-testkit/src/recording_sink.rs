//! In-memory sink double.
//!
//! Every call is recorded in order. Responses are scripted per operation
//! and entity id; anything unscripted succeeds. No network I/O.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use cip_sink::{Attributes, EntitySink, NgsiEntity, SinkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkOp {
    Create,
    Merge,
    Delete,
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    Create(NgsiEntity),
    Merge { id: String, attributes: Attributes },
    Delete { id: String },
}

impl SinkCall {
    pub fn op(&self) -> SinkOp {
        match self {
            SinkCall::Create(_) => SinkOp::Create,
            SinkCall::Merge { .. } => SinkOp::Merge,
            SinkCall::Delete { .. } => SinkOp::Delete,
        }
    }

    pub fn entity_id(&self) -> &str {
        match self {
            SinkCall::Create(e) => &e.id,
            SinkCall::Merge { id, .. } | SinkCall::Delete { id } => id,
        }
    }
}

#[derive(Default)]
struct Inner {
    calls: Vec<SinkCall>,
    scripted: HashMap<(SinkOp, String), VecDeque<Result<(), SinkError>>>,
    fallback: HashMap<SinkOp, Result<(), SinkError>>,
}

/// Scripted, recording [`EntitySink`].
#[derive(Default)]
pub struct RecordingSink {
    inner: Mutex<Inner>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that answers every merge with not-found, as a broker that has
    /// never seen any of the entities would.
    pub fn empty_broker() -> Self {
        let s = Self::new();
        s.respond_always(SinkOp::Merge, Err(SinkError::NotFound));
        s
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue one response for the next `op` on `entity_id`.
    pub fn respond(&self, op: SinkOp, entity_id: &str, result: Result<(), SinkError>) {
        self.lock()
            .scripted
            .entry((op, entity_id.to_string()))
            .or_default()
            .push_back(result);
    }

    /// Default response for `op` when nothing is queued.
    pub fn respond_always(&self, op: SinkOp, result: Result<(), SinkError>) {
        self.lock().fallback.insert(op, result);
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.lock().calls.clone()
    }

    pub fn calls_of(&self, op: SinkOp) -> Vec<SinkCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.op() == op)
            .cloned()
            .collect()
    }

    pub fn count(&self, op: SinkOp) -> usize {
        self.lock().calls.iter().filter(|c| c.op() == op).count()
    }

    fn record(&self, call: SinkCall) -> Result<(), SinkError> {
        let mut inner = self.lock();
        let key = (call.op(), call.entity_id().to_string());
        inner.calls.push(call);

        if let Some(r) = inner.scripted.get_mut(&key).and_then(VecDeque::pop_front) {
            return r;
        }
        inner.fallback.get(&key.0).cloned().unwrap_or(Ok(()))
    }
}

#[async_trait]
impl EntitySink for RecordingSink {
    async fn create_entity(&self, entity: &NgsiEntity) -> Result<(), SinkError> {
        self.record(SinkCall::Create(entity.clone()))
    }

    async fn merge_entity(&self, entity_id: &str, attributes: &Attributes) -> Result<(), SinkError> {
        self.record(SinkCall::Merge {
            id: entity_id.to_string(),
            attributes: attributes.clone(),
        })
    }

    async fn delete_entity(&self, entity_id: &str) -> Result<(), SinkError> {
        self.record(SinkCall::Delete {
            id: entity_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_then_fallback() {
        let sink = RecordingSink::new();
        sink.respond(SinkOp::Delete, "a", Err(SinkError::NotFound));

        assert_eq!(sink.delete_entity("a").await, Err(SinkError::NotFound));
        assert_eq!(sink.delete_entity("a").await, Ok(()));
        assert_eq!(sink.count(SinkOp::Delete), 2);
        assert_eq!(sink.calls()[0].entity_id(), "a");
    }

    #[tokio::test]
    async fn empty_broker_rejects_merges() {
        let sink = RecordingSink::empty_broker();
        let err = sink.merge_entity("x", &Attributes::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
