// src/summary.rs
//! Naive extractive summary: keep the first N sentences of a description.

use anyhow::{bail, Result};

/// Descriptions at or under this length are not summarized.
pub const MIN_SUMMARY_LEN: usize = 50;
pub const DEFAULT_MAX_SENTENCES: usize = 2;

pub const TOO_SHORT_PLACEHOLDER: &str = "Description too short to summarize.";
pub const FAILED_PLACEHOLDER: &str = "No summary available";

const SENTENCE_DELIMITER: &str = ". ";

/// Turns a description into a short summary.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct SentenceSummarizer {
    pub max_sentences: usize,
}

impl Default for SentenceSummarizer {
    fn default() -> Self {
        Self {
            max_sentences: DEFAULT_MAX_SENTENCES,
        }
    }
}

impl Summarizer for SentenceSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        simple_summarize(text, self.max_sentences)
    }
}

/// Keeps the first `max_sentences` segments split on `". "`.
/// A trailing `"."` is appended only when segments were dropped.
pub fn simple_summarize(text: &str, max_sentences: usize) -> Result<String> {
    if max_sentences == 0 {
        bail!("sentence budget must be at least 1");
    }
    let sentences: Vec<&str> = text.split(SENTENCE_DELIMITER).collect();
    let mut out = sentences
        .iter()
        .take(max_sentences)
        .copied()
        .collect::<Vec<_>>()
        .join(SENTENCE_DELIMITER);
    if sentences.len() > max_sentences {
        out.push('.');
    }
    Ok(out)
}

/// Length in UTF-16 code units.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}
