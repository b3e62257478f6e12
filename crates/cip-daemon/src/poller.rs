//! Background poll loops, one per enabled source.
//!
//! Each loop owns its [`ReconciliationEngine`]; the sink and both caches
//! behind the engines are shared through `Arc`. A loop never exits and
//! a failure inside one loop never reaches the other.

use std::sync::Arc;
use std::time::Duration;

use cip_feeds::{DisruptionFeed, FacilityFeed};
use cip_reconcile::{PassReport, ReconciliationEngine};
use tokio::task::JoinHandle;

/// Sleep lengths of the facilities loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacilitiesSchedule {
    /// After a completed pass.
    pub interval: Duration,
    /// After a failed fetch.
    pub retry: Duration,
}

// ---------------------------------------------------------------------------
// Facilities
// ---------------------------------------------------------------------------

/// Fetch the catalog and run one pass. Returns the pass report (if the
/// fetch succeeded) and how long to sleep before the next tick.
pub async fn facilities_tick(
    feed: &dyn FacilityFeed,
    engine: &ReconciliationEngine,
    schedule: FacilitiesSchedule,
) -> (Option<PassReport>, Duration) {
    match feed.fetch_facilities().await {
        Ok(collection) => {
            let report = engine
                .reconcile_facilities(feed.source_url(), &collection)
                .await;
            (Some(report), schedule.interval)
        }
        Err(err) => {
            tracing::error!(
                source = feed.source_url(),
                err = %err,
                retry_secs = schedule.retry.as_secs(),
                "failed to fetch facilities"
            );
            (None, schedule.retry)
        }
    }
}

pub fn spawn_facilities_loop(
    feed: Arc<dyn FacilityFeed>,
    engine: ReconciliationEngine,
    schedule: FacilitiesSchedule,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let (_, pause) = facilities_tick(feed.as_ref(), &engine, schedule).await;
            tokio::time::sleep(pause).await;
        }
    })
}

// ---------------------------------------------------------------------------
// City work
// ---------------------------------------------------------------------------

/// Fetch the disruption list and run one pass. `None` when the fetch failed;
/// the next tick retries after the regular interval.
pub async fn city_work_tick(
    feed: &dyn DisruptionFeed,
    engine: &ReconciliationEngine,
) -> Option<PassReport> {
    match feed.fetch_disruptions().await {
        Ok(response) => Some(engine.reconcile_city_work(&response).await),
        Err(err) => {
            tracing::error!(err = %err, "failed to fetch disruptions");
            None
        }
    }
}

pub fn spawn_city_work_loop(
    feed: Arc<dyn DisruptionFeed>,
    engine: ReconciliationEngine,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            city_work_tick(feed.as_ref(), &engine).await;
        }
    })
}
