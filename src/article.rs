// src/article.rs
//! Article records as returned by the upstream headlines API.
//!
//! Upstream fields are opaque to this service: an `Article` keeps the raw JSON
//! object and only reads `description`. Enrichment adds `sentiment` and
//! `summary` on top of whatever the upstream sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::sentiment::Sentiment;

/// One upstream article, kept as the raw JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article {
    fields: Map<String, Value>,
}

impl Article {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The description, if present as a non-empty string.
    /// `null`, a missing key, `""` and non-string values all count as absent.
    pub fn description(&self) -> Option<&str> {
        self.fields
            .get("description")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for Article {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// An upstream article plus the two derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedArticle {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub sentiment: Sentiment,
    pub summary: String,
}

impl EnrichedArticle {
    pub fn new(article: Article, sentiment: Sentiment, summary: String) -> Self {
        let mut fields = article.into_fields();
        // derived fields win over upstream keys with the same name
        fields.remove("sentiment");
        fields.remove("summary");
        Self {
            fields,
            sentiment,
            summary,
        }
    }
}
