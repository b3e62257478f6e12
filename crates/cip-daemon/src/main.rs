//! cip-daemon entry point.
//!
//! Sets up tracing, resolves configuration, spawns one poll loop per enabled
//! source and serves the health endpoint.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::Method;
use cip_config::ServiceConfig;
use cip_daemon::{
    poller::{self, FacilitiesSchedule},
    routes, state,
};
use cip_feeds::{DisruptionClient, FacilitiesClient};
use cip_reconcile::{DeletionWindowCache, EngineConfig, ReconciliationEngine, SeenFeatureCache};
use cip_sink::{ContextBrokerClient, EntitySink};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent if the file does not exist; deployments inject env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let config = ServiceConfig::from_env().context("invalid configuration")?;
    info!(config = ?config, "configuration resolved");

    let sink: Arc<dyn EntitySink> = Arc::new(
        ContextBrokerClient::new(config.context_broker_url.as_str())
            .context("failed to build context broker client")?,
    );
    let deletions = Arc::new(DeletionWindowCache::new());
    let seen = Arc::new(SeenFeatureCache::new());

    match &config.facilities {
        Some(f) => {
            let feed = Arc::new(FacilitiesClient::new(f.url.as_str(), f.api_key.as_str()));
            let engine = ReconciliationEngine::new(
                Arc::clone(&sink),
                Arc::clone(&deletions),
                Arc::clone(&seen),
                EngineConfig::default(),
            );
            poller::spawn_facilities_loop(
                feed,
                engine,
                FacilitiesSchedule {
                    interval: f.interval,
                    retry: f.retry_interval,
                },
            );
            info!(interval_secs = f.interval.as_secs(), "facilities loop started");
        }
        None => info!("facilities loop disabled"),
    }

    match &config.city_work {
        Some(c) => {
            let feed = Arc::new(DisruptionClient::new(c.url.as_str()));
            let engine = ReconciliationEngine::new(
                Arc::clone(&sink),
                Arc::clone(&deletions),
                Arc::clone(&seen),
                EngineConfig::default(),
            );
            poller::spawn_city_work_loop(feed, engine, c.interval);
            info!(interval_secs = c.interval.as_secs(), "city work loop started");
        }
        None => info!("city work loop disabled"),
    }

    let shared = Arc::new(state::AppState::new());
    let app = routes::build_router(shared)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.service_port));
    info!("cip-daemon listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(err = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
