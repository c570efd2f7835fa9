//! AI News Hub — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the news aggregator, routes, and metrics.

use ai_news_hub::{api, init_tracing, telemetry::Telemetry, NewsAggregator, NewsConfig};
use shuttle_axum::ShuttleAxum;
use tracing::info;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // Provider API keys (GNEWS_API_KEY, NEWS_API_KEY, ...) usually come from here.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = NewsConfig::load_default().expect("Failed to load news config");
    let telemetry = Telemetry::install(&cfg).expect("Failed to install metrics recorder");

    let aggregator = NewsAggregator::from_config(&cfg).expect("Failed to build news aggregator");
    info!(providers = ?aggregator.provider_names(), "news aggregator ready");

    let router = api::create_router(api::AppState::new(aggregator)).merge(telemetry.router());

    Ok(router.into())
}
