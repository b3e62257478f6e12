//! cip-reconcile
//!
//! Reconciliation of upstream records into the sink.
//!
//! - facilities: decode, consult the deletion window, then merge-or-create
//! - disruptions: fingerprint, skip anything already seen, create
//!
//! Caches live in memory only and start empty on every restart.

mod deletion;
mod engine;
mod seen;
mod types;

pub use deletion::{DeleteDecision, DeletionWindowCache, DELETION_WINDOW_DAYS};
pub use engine::ReconciliationEngine;
pub use seen::SeenFeatureCache;
pub use types::*;
