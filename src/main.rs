//! News sentiment aggregator: binary entrypoint.
//! Loads configuration, wires the Axum router and serves `GET /news`.

use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;

use news_sentiment_aggregator::{app, config::AppConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let cfg = AppConfig::from_env().context("loading configuration")?;
    let router = app(&cfg)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(
        %addr,
        sources = cfg.sources.len(),
        metrics = cfg.metrics_enabled,
        "server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
