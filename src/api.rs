use std::sync::Arc;

use axum::{
    extract::State,
    http::header::{HeaderValue, CACHE_CONTROL},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::ingest::aggregator::NewsAggregator;
use crate::render;

const FEED_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
}

impl AppState {
    pub fn new(aggregator: NewsAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(news_page))
        .route("/loading", get(loading_page))
        .route("/api/news", get(news_json))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Alias kept so callers can use `crate_root::router(state)`.
pub fn router(state: AppState) -> Router {
    create_router(state)
}

fn with_feed_cache(mut resp: Response) -> Response {
    resp.headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(FEED_CACHE_CONTROL));
    resp
}

async fn news_json(State(state): State<AppState>) -> Response {
    let articles = state.aggregator.get_news().await;
    with_feed_cache(Json(articles).into_response())
}

async fn news_page(State(state): State<AppState>) -> Response {
    let articles = state.aggregator.get_news().await;
    with_feed_cache(Html(render::render_page(&articles)).into_response())
}

async fn loading_page() -> Html<String> {
    Html(render::render_loading())
}
