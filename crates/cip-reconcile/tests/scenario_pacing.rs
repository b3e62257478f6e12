//! Sink pacing on a paused clock: sleeps advance virtual time only.

use std::sync::Arc;
use std::time::Duration;

use cip_reconcile::{DeletionWindowCache, EngineConfig, ReconciliationEngine, SeenFeatureCache};
use cip_sink::SinkError;
use cip_testkit::fixtures::{collection, deleted_days_ago, live_trail};
use cip_testkit::{RecordingSink, SinkOp};
use tokio::time::Instant;

const SOURCE: &str = "https://api.example.se/facilities";
const TRAIL_ID: &str = "urn:ngsi-ld:ExerciseTrail:se:sundsvall:facilities:641";

const PACING: EngineConfig = EngineConfig {
    throttle: Duration::from_millis(100),
    backoff: Duration::from_secs(10),
};

fn engine(sink: Arc<RecordingSink>) -> ReconciliationEngine {
    ReconciliationEngine::new(
        sink,
        Arc::new(DeletionWindowCache::new()),
        Arc::new(SeenFeatureCache::new()),
        PACING,
    )
}

async fn timed_pass(sink: Arc<RecordingSink>, features: Vec<cip_schemas::RawFeature>) -> Duration {
    let e = engine(sink);
    let started = Instant::now();
    e.reconcile_facilities(SOURCE, &collection(features)).await;
    started.elapsed()
}

#[tokio::test(start_paused = true)]
async fn successful_merge_is_throttled() {
    let sink = Arc::new(RecordingSink::new());
    let elapsed = timed_pass(sink.clone(), vec![live_trail(641, "A"), live_trail(642, "B")]).await;

    assert_eq!(sink.count(SinkOp::Merge), 2);
    assert_eq!(elapsed, PACING.throttle * 2);
}

#[tokio::test(start_paused = true)]
async fn create_after_not_found_is_throttled_once() {
    let sink = Arc::new(RecordingSink::empty_broker());
    let elapsed = timed_pass(sink.clone(), vec![live_trail(641, "A")]).await;

    assert_eq!(sink.count(SinkOp::Create), 1);
    assert_eq!(elapsed, PACING.throttle);
}

#[tokio::test(start_paused = true)]
async fn failed_merge_backs_off_without_throttle_or_create() {
    let sink = Arc::new(RecordingSink::new());
    sink.respond(
        SinkOp::Merge,
        TRAIL_ID,
        Err(SinkError::Status {
            code: 500,
            body: "internal".to_string(),
        }),
    );
    let elapsed = timed_pass(sink.clone(), vec![live_trail(641, "A")]).await;

    assert_eq!(sink.count(SinkOp::Create), 0);
    assert_eq!(elapsed, PACING.backoff);
}

#[tokio::test(start_paused = true)]
async fn delete_is_not_paced() {
    let sink = Arc::new(RecordingSink::new());
    let elapsed = timed_pass(
        sink.clone(),
        vec![
            deleted_days_ago(live_trail(641, "A"), 1),
            deleted_days_ago(live_trail(642, "B"), 1),
        ],
    )
    .await;

    assert_eq!(sink.count(SinkOp::Delete), 2);
    assert_eq!(elapsed, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn failed_delete_is_not_paced_either() {
    let sink = Arc::new(RecordingSink::new());
    sink.respond_always(SinkOp::Delete, Err(SinkError::Transport("reset".into())));
    let elapsed = timed_pass(sink.clone(), vec![deleted_days_ago(live_trail(641, "A"), 1)]).await;

    assert_eq!(sink.count(SinkOp::Delete), 1);
    assert_eq!(elapsed, Duration::ZERO);
}
