// src/upstream/newsapi.rs
//! NewsAPI-compatible `/v2/top-headlines` provider.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::article::Article;
use crate::config::AppConfig;
use crate::upstream::types::HeadlineProvider;

const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct TopHeadlines {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct NewsApiProvider {
    http: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for NewsApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl NewsApiProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build().context("building upstream http client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        Self::new(&cfg.base_url, &cfg.api_key, cfg.upstream_timeout)
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, TOP_HEADLINES_PATH)
    }
}

#[async_trait]
impl HeadlineProvider for NewsApiProvider {
    async fn fetch_top_headlines(&self, source: &str) -> Result<Vec<Article>> {
        let t0 = std::time::Instant::now();
        counter!("news_upstream_requests_total").increment(1);

        let rsp = self
            .http
            .get(self.endpoint())
            .query(&[("sources", source), ("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the full URL, which includes the api key
                anyhow!("request for source '{source}' failed: {}", e.without_url())
            })?;

        let status = rsp.status();
        let body = rsp
            .text()
            .await
            .map_err(|e| {
                anyhow!(
                    "reading response body for source '{source}': {}",
                    e.without_url()
                )
            })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<UpstreamError>(&body)
                .ok()
                .and_then(|e| match (e.code, e.message) {
                    (Some(c), Some(m)) => Some(format!("{c}: {m}")),
                    (None, Some(m)) => Some(m),
                    _ => None,
                });
            match detail {
                Some(d) => bail!("upstream returned {status} for source '{source}': {d}"),
                None => bail!("upstream returned {status} for source '{source}'"),
            }
        }

        let parsed: TopHeadlines = serde_json::from_str(&body)
            .with_context(|| format!("malformed response body for source '{source}'"))?;
        if parsed.status.as_deref() == Some("error") {
            bail!(
                "upstream reported an error for source '{source}': {}",
                parsed.message.as_deref().unwrap_or("no message")
            );
        }

        let articles = parsed.articles.unwrap_or_default();
        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("news_fetch_ms").record(ms);
        debug!(source, count = articles.len(), elapsed_ms = ms, "fetched top headlines");

        Ok(articles)
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }
}
