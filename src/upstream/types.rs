// src/upstream/types.rs
use anyhow::Result;

use crate::article::Article;

#[async_trait::async_trait]
pub trait HeadlineProvider: Send + Sync {
    /// Top headlines for one source key, in upstream order.
    async fn fetch_top_headlines(&self, source: &str) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
}
