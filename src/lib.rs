// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod article;
pub mod config;
pub mod enrich;
pub mod telemetry;
pub mod sentiment;
pub mod summary;
pub mod upstream;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::article::{Article, EnrichedArticle};
pub use crate::config::AppConfig;
pub use crate::sentiment::{Sentiment, SentimentAnalyzer};

use axum::Router;

/// Full application router for a config: `/news`, `/health`, and `/metrics`
/// when enabled. Installing the metrics recorder can only happen once per process.
pub fn app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = AppState::from_config(cfg)?;
    let mut router = create_router(state);
    if cfg.metrics_enabled {
        let m = telemetry::Metrics::init()?;
        router = router.merge(m.router());
    }
    Ok(router)
}
