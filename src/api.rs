// src/api.rs
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::article::EnrichedArticle;
use crate::config::AppConfig;
use crate::enrich::Enricher;
use crate::upstream::{self, newsapi::NewsApiProvider, types::HeadlineProvider};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn HeadlineProvider>,
    pub sources: Arc<Vec<String>>,
    pub enricher: Enricher,
}

impl AppState {
    pub fn new(provider: Arc<dyn HeadlineProvider>, sources: Vec<String>) -> Self {
        Self {
            provider,
            sources: Arc::new(sources),
            enricher: Enricher::default(),
        }
    }

    /// State backed by the real NewsAPI provider.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let provider = NewsApiProvider::from_config(cfg)?;
        Ok(Self::new(Arc::new(provider), cfg.sources.clone()))
    }

    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = enricher;
        self
    }
}

/// All origins; `GET`/`POST`; `Content-Type` header.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/news", get(news))
        .layer(cors_layer())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub articles: Vec<EnrichedArticle>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Failure of the fetch phase. Always a 500 with the cause in the body.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: format!("Unable to fetch news: {:#}", self.0),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

async fn news(State(state): State<AppState>) -> Result<Json<NewsResponse>, ApiError> {
    let articles = upstream::fetch_all(state.provider.as_ref(), &state.sources)
        .await
        .inspect_err(|e| {
            let reason = format!("{e:#}");
            error!(error = %reason, "Error fetching news");
        })?;

    let articles = state.enricher.enrich_all(articles);
    info!(
        sources = state.sources.len(),
        articles = articles.len(),
        "served news"
    );
    Ok(Json(NewsResponse { articles }))
}
