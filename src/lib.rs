// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod article;
pub mod config;
pub mod ingest;
pub mod render;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::article::Article;
pub use crate::config::NewsConfig;
pub use crate::ingest::aggregator::NewsAggregator;
pub use crate::ingest::merge::{merge, MAX_ARTICLES};
pub use crate::ingest::types::NewsProvider;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing logs; `RUST_LOG` overrides the default filter.
/// Uses `try_init` so it is a no-op when a subscriber is already installed.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ai_news_hub=info,news=info,warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}
