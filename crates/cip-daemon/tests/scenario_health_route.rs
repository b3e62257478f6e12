//! In-process tests for the health endpoint. The router is driven through
//! `tower::ServiceExt::oneshot`; no socket is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cip_daemon::{routes, state};
use http_body_util::BodyExt;
use tower::ServiceExt; // oneshot

async fn call(router: axum::Router, req: Request<Body>) -> (StatusCode, bytes::Bytes) {
    let resp = router.oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_returns_200_with_build_info() {
    let router = routes::build_router(Arc::new(state::AppState::new()));

    let (status, body) = call(router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).expect("body is not JSON");
    assert_eq!(json["ok"], true);
    assert_eq!(json["service"], "cip-daemon");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let router = routes::build_router(Arc::new(state::AppState::new()));
    let (status, _) = call(router, get("/v1/health")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_rejects_post() {
    let router = routes::build_router(Arc::new(state::AppState::new()));
    let req = Request::builder()
        .method("POST")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(router, req).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
