use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Fingerprints of disruptions already created in this process.
///
/// Never evicts: grows for the life of the process.
#[derive(Debug, Default)]
pub struct SeenFeatureCache {
    fingerprints: Mutex<HashSet<String>>,
}

impl SeenFeatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self, fingerprint: &str) -> bool {
        self.fingerprints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(fingerprint)
    }

    pub fn mark_seen(&self, fingerprint: impl Into<String>) {
        self.fingerprints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(fingerprint.into());
    }

    pub fn len(&self) -> usize {
        self.fingerprints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
