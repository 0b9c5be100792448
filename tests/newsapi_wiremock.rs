//! Integration tests for the NewsAPI provider and the full `/news` pipeline
//! against a mock upstream (wiremock).

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt as _;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use news_sentiment_aggregator::upstream::newsapi::NewsApiProvider;
use news_sentiment_aggregator::upstream::fetch_all;
use news_sentiment_aggregator::upstream::types::HeadlineProvider;
use news_sentiment_aggregator::{app, AppConfig};

const API_KEY: &str = "test-key";

fn headlines(articles: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "ok",
        "totalResults": articles.as_array().map_or(0, Vec::len),
        "articles": articles
    }))
}

async fn mount_source(server: &MockServer, source: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("sources", source))
        .and(query_param("apiKey", API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> NewsApiProvider {
    NewsApiProvider::new(server.uri(), API_KEY, None).expect("client")
}

fn config(server: &MockServer, sources: &[&str]) -> AppConfig {
    let mut cfg = AppConfig::new(API_KEY);
    cfg.base_url = server.uri();
    cfg.sources = sources.iter().map(|s| s.to_string()).collect();
    cfg
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn provider_sends_source_and_key_and_returns_articles() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "reuters",
        headlines(json!([
            {"title": "one", "description": "first"},
            {"title": "two", "description": null}
        ])),
    )
    .await;

    let articles = provider(&server)
        .fetch_top_headlines("reuters")
        .await
        .expect("fetch ok");
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].description(), Some("first"));
    assert_eq!(articles[1].description(), None);
}

#[tokio::test]
async fn provider_treats_missing_articles_as_empty() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "cnn",
        ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})),
    )
    .await;

    let articles = provider(&server).fetch_top_headlines("cnn").await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn provider_surfaces_non_2xx_with_upstream_message() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "cnn",
        ResponseTemplate::new(401).set_body_json(json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid or incorrect."
        })),
    )
    .await;

    let err = provider(&server)
        .fetch_top_headlines("cnn")
        .await
        .unwrap_err()
        .to_string();
    assert!(err.contains("401"), "{err}");
    assert!(err.contains("'cnn'"), "{err}");
    assert!(err.contains("apiKeyInvalid"), "{err}");
}

#[tokio::test]
async fn provider_rejects_malformed_body() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "cnn",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let err = provider(&server).fetch_top_headlines("cnn").await.unwrap_err();
    assert!(format!("{err:#}").contains("malformed"), "{err:#}");
}

#[tokio::test]
async fn provider_rejects_error_status_in_ok_body() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "cnn",
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "sources unavailable"
        })),
    )
    .await;

    let err = provider(&server).fetch_top_headlines("cnn").await.unwrap_err();
    assert!(err.to_string().contains("sources unavailable"));
}

#[tokio::test]
async fn provider_reports_transport_errors() {
    // nothing listens on port 1
    let p = NewsApiProvider::new("http://127.0.0.1:1", API_KEY, None).unwrap();
    let err = p.fetch_top_headlines("cnn").await.unwrap_err();
    assert!(err.to_string().contains("request for source 'cnn' failed"));
}

#[tokio::test]
async fn provider_honours_optional_timeout() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "cnn",
        headlines(json!([])).set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let p = NewsApiProvider::new(
        server.uri(),
        API_KEY,
        Some(std::time::Duration::from_millis(200)),
    )
    .unwrap();
    assert!(p.fetch_top_headlines("cnn").await.is_err());
}

// ============================================================================
// Full pipeline
// ============================================================================

async fn get_news(cfg: &AppConfig) -> (StatusCode, Value) {
    let router = app(cfg).expect("router");
    let resp = router
        .oneshot(Request::get("/news").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn news_end_to_end_against_mock_upstream() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "cnn",
        headlines(json!([{
            "title": "c1",
            "url": "https://example.com/c1",
            "description": "Markets rose today. Investors are optimistic. Analysts predict growth."
        }])),
    )
    .await;
    mount_source(&server, "reuters", headlines(json!([]))).await;
    mount_source(
        &server,
        "bbc-news",
        headlines(json!([{"title": "b1", "description": "Short one."}])),
    )
    .await;

    let (status, v) = get_news(&config(&server, &["cnn", "reuters", "bbc-news"])).await;
    assert_eq!(status, StatusCode::OK);

    let articles = v["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "c1");
    assert_eq!(articles[0]["url"], "https://example.com/c1");
    assert_eq!(
        articles[0]["summary"],
        "Markets rose today. Investors are optimistic."
    );
    assert_eq!(articles[0]["sentiment"], "Positive");
    assert_eq!(articles[1]["title"], "b1");
    assert_eq!(articles[1]["summary"], "Description too short to summarize.");
}

#[tokio::test]
async fn news_returns_500_when_any_upstream_fails() {
    let server = MockServer::start().await;
    mount_source(&server, "cnn", headlines(json!([{"title": "c1"}]))).await;
    mount_source(&server, "reuters", ResponseTemplate::new(500)).await;

    let (status, v) = get_news(&config(&server, &["cnn", "reuters"])).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(v.get("articles").is_none());

    let msg = v["error"].as_str().unwrap();
    assert!(msg.starts_with("Unable to fetch news: "), "{msg}");
    assert!(msg.contains("500"), "{msg}");
    assert!(msg.contains("'reuters'"), "{msg}");
}

#[tokio::test]
async fn error_body_never_contains_api_key() {
    let mut cfg = AppConfig::new("SUPER-SECRET-KEY");
    // nothing listens on port 1
    cfg.base_url = "http://127.0.0.1:1".to_string();
    cfg.sources = vec!["cnn".to_string()];

    let (status, v) = get_news(&cfg).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let msg = v["error"].as_str().unwrap();
    assert!(msg.contains("request for source 'cnn' failed"), "{msg}");
    assert!(!msg.contains("SUPER-SECRET-KEY"), "{msg}");
    assert!(!msg.contains("apiKey="), "{msg}");
}

#[tokio::test]
async fn timeout_error_never_contains_api_key() {
    let server = MockServer::start().await;
    mount_source(
        &server,
        "cnn",
        headlines(json!([])).set_delay(std::time::Duration::from_secs(3)),
    )
    .await;

    let p = NewsApiProvider::new(
        server.uri(),
        API_KEY,
        Some(std::time::Duration::from_millis(200)),
    )
    .unwrap();
    let err = format!("{:#}", p.fetch_top_headlines("cnn").await.unwrap_err());
    assert!(!err.contains(API_KEY), "{err}");
}

#[tokio::test]
async fn all_sources_are_requested_concurrently() {
    let server = MockServer::start().await;
    let delay = std::time::Duration::from_millis(400);
    let names = ["cnn", "reuters", "bbc-news", "bloomberg"];
    for source in names {
        mount_source(
            &server,
            source,
            headlines(json!([{ "title": source }])).set_delay(delay),
        )
        .await;
    }

    let sources: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    let t0 = std::time::Instant::now();
    let articles = fetch_all(&provider(&server), &sources).await.unwrap();
    let elapsed = t0.elapsed();

    // sequential fetching would take at least 4 x 400ms
    assert!(
        elapsed < delay * 3,
        "fetches were not issued together: took {elapsed:?}"
    );
    let titles: Vec<&str> = articles
        .iter()
        .map(|a| a.get("title").and_then(|t| t.as_str()).unwrap())
        .collect();
    assert_eq!(titles, names);
}
