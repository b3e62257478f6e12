//! Deletion window: decides whether a retired facility still needs a delete
//! call, so a feature is deleted once per process and the historical
//! backlog is never flooded on cold start.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use cip_schemas::{parse_upstream_time, RawFeature};

pub const DELETION_WINDOW_DAYS: i64 = 30;

/// Answer of [`DeletionWindowCache::should_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteDecision {
    pub ok_to_delete: bool,
    pub already_handled: bool,
}

impl DeleteDecision {
    const LIVE: Self = Self {
        ok_to_delete: false,
        already_handled: false,
    };
    const DELETE_NOW: Self = Self {
        ok_to_delete: true,
        already_handled: false,
    };
    const HANDLED: Self = Self {
        ok_to_delete: true,
        already_handled: true,
    };

    pub fn as_tuple(&self) -> (bool, bool) {
        (self.ok_to_delete, self.already_handled)
    }
}

/// `feature id → deletedAt`, shared by every facility kind in one process.
///
/// One mutex covers the whole check-then-insert, so two concurrent passes
/// never both decide to delete the same feature.
#[derive(Debug)]
pub struct DeletionWindowCache {
    window: Duration,
    handled: Mutex<HashMap<i64, DateTime<Utc>>>,
}

impl Default for DeletionWindowCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DeletionWindowCache {
    pub fn new() -> Self {
        Self {
            window: Duration::days(DELETION_WINDOW_DAYS),
            handled: Mutex::new(HashMap::new()),
        }
    }

    pub fn should_delete(&self, feature: &RawFeature) -> DeleteDecision {
        self.should_delete_at(feature, Utc::now())
    }

    pub fn should_delete_at(&self, feature: &RawFeature, now: DateTime<Utc>) -> DeleteDecision {
        if feature.is_live() {
            return DeleteDecision::LIVE;
        }

        let deleted_at = retired_at(feature);
        let window_start = now - self.window;

        let mut handled = self.handled.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = handled.get(&feature.id).copied() {
            if cached < window_start {
                handled.remove(&feature.id);
            }
            return DeleteDecision::HANDLED;
        }

        if deleted_at < window_start {
            return DeleteDecision::HANDLED;
        }

        handled.insert(feature.id, deleted_at);
        DeleteDecision::DELETE_NOW
    }

    pub fn len(&self) -> usize {
        self.handled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, feature_id: i64) -> bool {
        self.handled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&feature_id)
    }
}

/// First parsable of `deleted`, `updated`, `created`; the minimum time when
/// none parse.
fn retired_at(feature: &RawFeature) -> DateTime<Utc> {
    let p = &feature.properties;
    [&p.deleted, &p.updated, &p.created]
        .into_iter()
        .filter_map(|t| t.as_deref().and_then(parse_upstream_time))
        .next()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
