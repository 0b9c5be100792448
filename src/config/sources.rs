// src/config/sources.rs
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_SOURCES_PATH: &str = "NEWS_SOURCES_PATH";

/// Publisher keys queried when no sources file is configured.
/// Response order follows this order.
pub const DEFAULT_SOURCES: &[&str] = &[
    "cnn",
    "reuters",
    "bbc-news",
    "the-wall-street-journal",
    "associated-press",
    "bloomberg",
    "fox-news",
    "the-times-of-india",
];

pub fn default_sources() -> Vec<String> {
    DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
}

/// Load the source list from an explicit path. Supports TOML or JSON formats.
pub fn load_sources_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let sources = parse_sources(&content, ext.as_str())
        .with_context(|| format!("parsing sources from {}", path.display()))?;
    if sources.is_empty() {
        bail!("source list in {} is empty", path.display());
    }
    Ok(sources)
}

/// $NEWS_SOURCES_PATH if set (must exist), otherwise the built-in list.
pub fn load_sources_default() -> Result<Vec<String>> {
    match std::env::var(ENV_SOURCES_PATH) {
        Ok(p) if !p.trim().is_empty() => {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{ENV_SOURCES_PATH} points to non-existent path {}",
                    pb.display()
                ));
            }
            load_sources_from(&pb)
        }
        _ => Ok(default_sources()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourcesFormat {
    Toml,
    Json,
}

impl SourcesFormat {
    /// Extension decides; without a known one, a leading `[` or `{` means JSON.
    fn detect(ext: &str, content: &str) -> Self {
        match ext {
            "toml" => Self::Toml,
            "json" => Self::Json,
            _ if content.trim_start().starts_with(['[', '{']) => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// `sources = [..]` in TOML; a bare array or `{"sources": [..]}` in JSON.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SourcesDoc {
    List(Vec<String>),
    Table { sources: Vec<String> },
}

impl SourcesDoc {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(v) | Self::Table { sources: v } => v,
        }
    }
}

fn parse_sources(s: &str, ext: &str) -> Result<Vec<String>> {
    let doc: SourcesDoc = match SourcesFormat::detect(ext, s) {
        SourcesFormat::Toml => toml::from_str(s).context("expected TOML `sources = [..]`")?,
        SourcesFormat::Json => serde_json::from_str(s)
            .context("expected a JSON array or an object with a `sources` array")?,
    };
    Ok(clean_list(doc.into_list()))
}

/// Trim, drop blanks, drop repeats. First occurrence wins so order is kept.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|s| s == t) {
            out.push(t.to_string());
        }
    }
    out
}
