// src/enrich.rs
//! Per-article annotation: sentiment label plus summary.
//!
//! Articles are independent of each other. A summarizer failure only
//! degrades that one article's summary; it never fails the batch.

use std::sync::Arc;

use metrics::counter;
use tracing::error;

use crate::article::{Article, EnrichedArticle};
use crate::sentiment::SentimentAnalyzer;
use crate::summary::{
    text_len, SentenceSummarizer, Summarizer, FAILED_PLACEHOLDER, MIN_SUMMARY_LEN,
    TOO_SHORT_PLACEHOLDER,
};

pub const MISSING_DESCRIPTION: &str = "No description available";

#[derive(Clone)]
pub struct Enricher {
    analyzer: SentimentAnalyzer,
    summarizer: Arc<dyn Summarizer>,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(Arc::new(SentenceSummarizer::default()))
    }
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher").finish_non_exhaustive()
    }
}

impl Enricher {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(),
            summarizer,
        }
    }

    pub fn enrich(&self, index: usize, article: Article) -> EnrichedArticle {
        let description = article.description().unwrap_or(MISSING_DESCRIPTION);
        let sentiment = self.analyzer.classify(description);
        let summary = self.summary_for(index, description);
        EnrichedArticle::new(article, sentiment, summary)
    }

    /// Order of the output matches the input.
    pub fn enrich_all(&self, articles: Vec<Article>) -> Vec<EnrichedArticle> {
        articles
            .into_iter()
            .enumerate()
            .map(|(i, a)| self.enrich(i, a))
            .collect()
    }

    fn summary_for(&self, index: usize, description: &str) -> String {
        if text_len(description) <= MIN_SUMMARY_LEN {
            return TOO_SHORT_PLACEHOLDER.to_string();
        }
        match self.summarizer.summarize(description) {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, article = index, "Error generating summary");
                counter!("news_summary_errors_total").increment(1);
                FAILED_PLACEHOLDER.to_string()
            }
        }
    }
}
