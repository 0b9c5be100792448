// src/config/mod.rs
//! Process configuration, read once at startup and passed into the router.

pub mod sources;

use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org";

pub const ENV_PORT: &str = "PORT";
pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
pub const ENV_METRICS_ENABLED: &str = "METRICS_ENABLED";

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: String,
    pub base_url: String,
    /// Queried in this order; response order follows it.
    pub sources: Vec<String>,
    /// `None` means upstream calls never time out.
    pub upstream_timeout: Option<Duration>,
    pub metrics_enabled: bool,
}

// Keep the API key out of logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("api_key_len", &self.api_key.len())
            .field("base_url", &self.base_url)
            .field("sources", &self.sources)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish()
    }
}

impl AppConfig {
    /// Config with the built-in source list and no timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: api_key.into(),
            base_url: DEFAULT_NEWS_API_BASE_URL.to_string(),
            sources: sources::default_sources(),
            upstream_timeout: None,
            metrics_enabled: false,
        }
    }

    pub fn from_env() -> Result<Self> {
        let port = match env::var(ENV_PORT) {
            Ok(p) if !p.trim().is_empty() => p
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid {ENV_PORT} value '{p}'"))?,
            _ => DEFAULT_PORT,
        };

        let api_key = env::var(ENV_NEWS_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("Missing {ENV_NEWS_API_KEY} env var"))?;

        let base_url = env::var(ENV_NEWS_API_BASE_URL)
            .ok()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_NEWS_API_BASE_URL.to_string());

        let upstream_timeout = match env::var(ENV_UPSTREAM_TIMEOUT_SECS) {
            Ok(s) if !s.trim().is_empty() => {
                let secs = s
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid {ENV_UPSTREAM_TIMEOUT_SECS} value '{s}'"))?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        let metrics_enabled = env::var(ENV_METRICS_ENABLED).ok().as_deref() == Some("1");

        Ok(Self {
            port,
            api_key,
            base_url,
            sources: sources::load_sources_default()?,
            upstream_timeout,
            metrics_enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for k in [
            ENV_PORT,
            ENV_NEWS_API_KEY,
            ENV_NEWS_API_BASE_URL,
            ENV_UPSTREAM_TIMEOUT_SECS,
            ENV_METRICS_ENABLED,
            sources::ENV_SOURCES_PATH,
        ] {
            env::remove_var(k);
        }
    }

    #[serial_test::serial]
    #[test]
    fn defaults_apply_when_only_key_is_set() {
        clear_env();
        env::set_var(ENV_NEWS_API_KEY, "k");

        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.base_url, DEFAULT_NEWS_API_BASE_URL);
        assert_eq!(cfg.sources, sources::default_sources());
        assert!(cfg.upstream_timeout.is_none());
        assert!(!cfg.metrics_enabled);
        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn missing_key_and_bad_port_are_errors() {
        clear_env();
        assert!(AppConfig::from_env().is_err());

        env::set_var(ENV_NEWS_API_KEY, "k");
        env::set_var(ENV_PORT, "not-a-port");
        let err = AppConfig::from_env().unwrap_err();
        assert!(format!("{err:#}").contains("PORT"));
        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn overrides_are_read() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("sources.toml");
        std::fs::write(&p, r#"sources = ["reuters", "cnn"]"#).unwrap();

        env::set_var(ENV_NEWS_API_KEY, "k");
        env::set_var(ENV_PORT, "8080");
        env::set_var(ENV_NEWS_API_BASE_URL, "http://localhost:9999/");
        env::set_var(ENV_UPSTREAM_TIMEOUT_SECS, "7");
        env::set_var(ENV_METRICS_ENABLED, "1");
        env::set_var(sources::ENV_SOURCES_PATH, p.display().to_string());

        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.base_url, "http://localhost:9999");
        assert_eq!(cfg.sources, vec!["reuters".to_string(), "cnn".to_string()]);
        assert_eq!(cfg.upstream_timeout, Some(Duration::from_secs(7)));
        assert!(cfg.metrics_enabled);
        clear_env();
    }

    #[test]
    fn debug_output_hides_api_key() {
        let cfg = AppConfig::new("super-secret");
        let s = format!("{cfg:?}");
        assert!(!s.contains("super-secret"));
        assert!(s.contains("api_key_len"));
    }
}
