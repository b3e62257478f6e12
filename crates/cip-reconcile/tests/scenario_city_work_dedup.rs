use std::sync::Arc;

use cip_reconcile::{DeletionWindowCache, EngineConfig, ReconciliationEngine, SeenFeatureCache};
use cip_sink::SinkError;
use cip_testkit::fixtures::{disruption, disruptions};
use cip_testkit::{RecordingSink, SinkCall, SinkOp};

const FP_ID: &str = "urn:ngsi-ld:CityWork:620761:6922511:20220501Z:20220629Z";

fn engine(sink: Arc<RecordingSink>) -> ReconciliationEngine {
    ReconciliationEngine::new(
        sink,
        Arc::new(DeletionWindowCache::new()),
        Arc::new(SeenFeatureCache::new()),
        EngineConfig::unthrottled(),
    )
}

#[tokio::test]
async fn same_fingerprint_is_created_once_across_passes() {
    let sink = Arc::new(RecordingSink::new());
    let e = engine(sink.clone());
    let feed = disruptions(vec![disruption(
        620761.4,
        6922510.665,
        "2022-05-01Z",
        "2022-06-29Z",
    )]);

    let first = e.reconcile_city_work(&feed).await;
    let second = e.reconcile_city_work(&feed).await;

    assert_eq!(first.created, 1);
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped_seen, 1);
    assert_eq!(sink.count(SinkOp::Create), 1);
    assert_eq!(sink.count(SinkOp::Merge), 0);
    assert_eq!(e.seen().len(), 1);

    let SinkCall::Create(entity) = &sink.calls()[0] else {
        panic!("expected create");
    };
    assert_eq!(entity.id, FP_ID);
    assert_eq!(entity.kind, "CityWork");
    assert_eq!(entity.attributes["name"]["value"], "Norbergsvägen");
    assert_eq!(
        entity.attributes["startDate"]["value"]["@value"],
        "2022-05-01T00:00:00Z"
    );
}

#[tokio::test]
async fn failed_create_is_retried_next_pass() {
    let sink = Arc::new(RecordingSink::new());
    sink.respond(
        SinkOp::Create,
        FP_ID,
        Err(SinkError::Transport("timeout".into())),
    );
    let e = engine(sink.clone());
    let feed = disruptions(vec![disruption(
        620761.4,
        6922510.665,
        "2022-05-01Z",
        "2022-06-29Z",
    )]);

    let first = e.reconcile_city_work(&feed).await;
    let second = e.reconcile_city_work(&feed).await;

    assert_eq!(first.failures.len(), 1);
    assert_eq!(second.created, 1);
    assert_eq!(sink.count(SinkOp::Create), 2);
}

#[tokio::test]
async fn small_jitter_rounds_to_same_identity() {
    let sink = Arc::new(RecordingSink::new());
    let e = engine(sink.clone());

    e.reconcile_city_work(&disruptions(vec![
        disruption(620761.4, 6922510.665, "2022-05-01", "2022-05-02"),
        disruption(620761.2, 6922510.9, "2022-05-01", "2022-05-02"),
        disruption(620761.2, 6922510.9, "2022-05-01", "2022-05-03"),
    ]))
    .await;

    assert_eq!(sink.count(SinkOp::Create), 2);
}

#[tokio::test]
async fn disruption_without_point_fails_alone() {
    let sink = Arc::new(RecordingSink::new());
    let e = engine(sink.clone());

    let mut broken = disruption(1.0, 2.0, "2022-05-01", "2022-05-02");
    broken.geometry.geometries.clear();

    let report = e
        .reconcile_city_work(&disruptions(vec![
            broken,
            disruption(620761.4, 6922510.665, "2022-05-01", "2022-05-02"),
        ]))
        .await;

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.created, 1);
}

#[tokio::test]
async fn seen_cache_is_shared_between_engines() {
    let seen = Arc::new(SeenFeatureCache::new());
    let sink = Arc::new(RecordingSink::new());
    let feed = disruptions(vec![disruption(
        620761.4,
        6922510.665,
        "2022-05-01Z",
        "2022-06-29Z",
    )]);

    for _ in 0..2 {
        let e = ReconciliationEngine::new(
            sink.clone(),
            Arc::new(DeletionWindowCache::new()),
            seen.clone(),
            EngineConfig::unthrottled(),
        );
        e.reconcile_city_work(&feed).await;
    }

    assert_eq!(sink.count(SinkOp::Create), 1);
    assert_eq!(seen.len(), 1);
}
