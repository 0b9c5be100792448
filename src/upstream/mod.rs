// src/upstream/mod.rs
pub mod newsapi;
pub mod types;

use anyhow::Result;
use futures::future::try_join_all;
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use tracing::error;

use crate::article::Article;
use crate::upstream::types::HeadlineProvider;

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_upstream_requests_total",
            "Upstream top-headline requests issued."
        );
        describe_counter!(
            "news_upstream_errors_total",
            "Upstream requests that failed (transport, status or body)."
        );
        describe_counter!(
            "news_articles_total",
            "Articles returned to clients after aggregation."
        );
        describe_counter!(
            "news_summary_errors_total",
            "Articles whose summary fell back to the placeholder."
        );
        describe_histogram!(
            "news_fetch_ms",
            "Per-source upstream fetch time in milliseconds."
        );
    });
}

/// Fetch every source at once and flatten the results.
///
/// All-or-nothing: the first failure fails the whole call and no articles are
/// returned. Output order is source-list order, then upstream order.
pub async fn fetch_all(
    provider: &dyn HeadlineProvider,
    sources: &[String],
) -> Result<Vec<Article>> {
    ensure_metrics_described();

    let fetches = sources.iter().map(|source| async move {
        provider
            .fetch_top_headlines(source)
            .await
            .inspect_err(|e| {
                let reason = format!("{e:#}");
                error!(
                    error = %reason,
                    source = %source,
                    provider = provider.name(),
                    "upstream fetch failed"
                );
                counter!("news_upstream_errors_total").increment(1);
            })
    });

    let per_source = try_join_all(fetches).await?;
    let articles: Vec<Article> = per_source.into_iter().flatten().collect();
    counter!("news_articles_total").increment(articles.len() as u64);
    Ok(articles)
}
