// tests/providers_http.rs
//
// Each adapter against a local Axum server replaying a recorded provider payload.
// Covers field mapping + defaults, the freshness hint, failure isolation
// (non-2xx, bad JSON, timeout) and the missing-key short-circuit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_news_hub::ingest::providers::{
    currents::CurrentsProvider, gnews::GNewsProvider, mediastack::MediastackProvider,
    newsapi::NewsApiProvider, newscatcher::NewsCatcherProvider, newsdata::NewsDataProvider,
    ProviderSettings,
};
use ai_news_hub::NewsProvider;
use axum::{
    extract::RawQuery,
    http::{HeaderMap, StatusCode},
    Router,
};

/// What the fake provider saw: (query string, cache-control header).
type Seen = Arc<Mutex<Vec<(String, Option<String>)>>>;

struct FakeProvider {
    url: String,
    hits: Arc<AtomicUsize>,
    seen: Seen,
}

async fn serve(status: StatusCode, body: &'static str, delay: Duration) -> FakeProvider {
    let hits = Arc::new(AtomicUsize::new(0));
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new().fallback({
        let hits = hits.clone();
        let seen = seen.clone();
        move |RawQuery(q): RawQuery, headers: HeaderMap| {
            let hits = hits.clone();
            let seen = seen.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let cc = headers
                    .get("cache-control")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                seen.lock().unwrap().push((q.unwrap_or_default(), cc));
                tokio::time::sleep(delay).await;
                (status, [("content-type", "application/json")], body)
            }
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    FakeProvider {
        url: format!("http://{addr}/search"),
        hits,
        seen,
    }
}

async fn serve_ok(body: &'static str) -> FakeProvider {
    serve(StatusCode::OK, body, Duration::ZERO).await
}

fn key() -> Option<String> {
    Some("test-key".to_string())
}

#[tokio::test]
async fn gnews_maps_fixture_and_sends_query() {
    let fake = serve_ok(include_str!("fixtures/gnews.json")).await;
    let p = GNewsProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    let out = p.fetch().await;
    assert_eq!(out.len(), 3);

    let first = &out[0];
    assert_eq!(first.title, "OpenAI ships a new reasoning model");
    assert_eq!(first.description, "The release focuses on math & coding.");
    assert_eq!(first.image, "https://example.com/img/openai.jpg");
    assert_eq!(first.source_name, "Example Tech");
    assert_eq!(first.url, "https://example.com/openai-reasoning");

    assert_eq!(out[1].description, "");
    assert_eq!(out[1].image, "");
    assert_eq!(out[2].source_name, "Unknown");

    let seen = fake.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let (query, cache_control) = &seen[0];
    assert!(query.contains("apikey=test-key"), "query: {query}");
    assert!(query.contains("lang=en"), "query: {query}");
    assert!(query.contains("max=10"), "query: {query}");
    assert!(query.contains("artificial"), "query: {query}");
    assert_eq!(cache_control.as_deref(), Some("max-age=3600"));
}

#[tokio::test]
async fn newsapi_maps_url_to_image_and_null_source() {
    let fake = serve_ok(include_str!("fixtures/newsapi.json")).await;
    let p = NewsApiProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    let out = p.fetch().await;
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].image, "https://example.com/img/robots.jpg");
    assert_eq!(out[0].source_name, "The Verge");
    assert_eq!(out[1].source_name, "Unknown");
    assert_eq!(out[1].description, "");

    let (query, _) = fake.seen.lock().unwrap()[0].clone();
    assert!(query.contains("apiKey=test-key"), "query: {query}");
    assert!(query.contains("sortBy=publishedAt"), "query: {query}");
    assert!(query.contains("pageSize=10"), "query: {query}");
}

#[tokio::test]
async fn newsdata_maps_link_and_source_id() {
    let fake = serve_ok(include_str!("fixtures/newsdata.json")).await;
    let p = NewsDataProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    let out = p.fetch().await;
    assert_eq!(out.len(), 1);
    let a = &out[0];
    assert_eq!(a.url, "https://example.com/ai-triage");
    assert_eq!(a.source_name, "examplehealth");
    assert_eq!(a.image, "");
    assert_eq!(a.published_at, "2024-05-01 07:45:00");
    assert!(a.published_at_utc().is_some());

    let (query, _) = fake.seen.lock().unwrap()[0].clone();
    assert!(query.contains("category=technology"), "query: {query}");
    assert!(query.contains("size=10"), "query: {query}");
}

#[tokio::test]
async fn mediastack_keeps_unparseable_dates_and_defaults_source() {
    let fake = serve_ok(include_str!("fixtures/mediastack.json")).await;
    let p = MediastackProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    let out = p.fetch().await;
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].source_name, "examplewire");
    assert_eq!(out[1].source_name, "Unknown");
    assert_eq!(out[1].published_at, "not a date");
    assert!(out[1].published_at_utc().is_none());

    let (query, _) = fake.seen.lock().unwrap()[0].clone();
    assert!(query.contains("access_key=test-key"), "query: {query}");
    assert!(query.contains("languages=en"), "query: {query}");
    assert!(query.contains("limit=10"), "query: {query}");
}

#[tokio::test]
async fn newscatcher_maps_summary_media_author() {
    let fake = serve_ok(include_str!("fixtures/newscatcher.json")).await;
    let p = NewsCatcherProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    let out = p.fetch().await;
    assert_eq!(out.len(), 1);
    let a = &out[0];
    assert_eq!(a.description, "Researchers question leaderboard methodology.");
    assert_eq!(a.image, "https://example.com/img/bench.jpg");
    assert_eq!(a.source_name, "R. Smith");
    assert_eq!(a.url, "https://example.com/benchmarks");

    let (query, _) = fake.seen.lock().unwrap()[0].clone();
    assert!(query.contains("api_key=test-key"), "query: {query}");
    assert!(query.contains("page_size=10"), "query: {query}");
}

#[tokio::test]
async fn currents_maps_author_and_drops_none_image() {
    let fake = serve_ok(include_str!("fixtures/currents.json")).await;
    let p = CurrentsProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    let out = p.fetch().await;
    assert_eq!(out.len(), 1);
    let a = &out[0];
    assert_eq!(a.image, "");
    assert_eq!(a.source_name, "Unknown");
    assert!(a.published_at_utc().is_some());

    let (query, _) = fake.seen.lock().unwrap()[0].clone();
    assert!(query.contains("apiKey=test-key"), "query: {query}");
    assert!(query.contains("keywords=artificial"), "query: {query}");
}

#[tokio::test]
async fn missing_key_never_hits_the_network() {
    let fake = serve_ok(include_str!("fixtures/gnews.json")).await;
    let p = GNewsProvider::new(None, ProviderSettings::default()).with_base_url(&fake.url);

    assert!(p.fetch().await.is_empty());
    assert!(p.fetch_latest().await.unwrap().is_empty());
    assert_eq!(fake.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_success_status_is_an_empty_list() {
    let fake = serve(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"status":"error","code":"rateLimited"}"#,
        Duration::ZERO,
    )
    .await;
    let p = NewsApiProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    let err = p.fetch_latest().await.expect_err("429 must be an error");
    assert!(format!("{err:#}").contains("429"), "error: {err:#}");
    assert!(p.fetch().await.is_empty());
    assert_eq!(fake.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn malformed_body_is_an_empty_list() {
    let fake = serve_ok("<html>definitely not json</html>").await;
    let p = MediastackProvider::new(key(), ProviderSettings::default()).with_base_url(&fake.url);

    assert!(p.fetch_latest().await.is_err());
    assert!(p.fetch().await.is_empty());
}

#[tokio::test]
async fn slow_provider_times_out_to_empty() {
    let fake = serve(
        StatusCode::OK,
        include_str!("fixtures/currents.json"),
        Duration::from_secs(3),
    )
    .await;
    let settings = ProviderSettings {
        timeout: Duration::from_millis(200),
        ..ProviderSettings::default()
    };
    let p = CurrentsProvider::new(key(), settings).with_base_url(&fake.url);

    let started = std::time::Instant::now();
    assert!(p.fetch().await.is_empty());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn unreachable_provider_is_an_empty_list() {
    // Port 9 (discard) on loopback: connection refused.
    let p = NewsCatcherProvider::new(key(), ProviderSettings::default())
        .with_base_url("http://127.0.0.1:9/search");
    assert!(p.fetch().await.is_empty());
}
