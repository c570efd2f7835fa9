// src/telemetry.rs
//! Prometheus exporter for the `metrics` facade used across the crate.

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{describe_gauge, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::NewsConfig;

#[derive(Clone)]
pub struct Telemetry {
    handle: PrometheusHandle,
}

impl Telemetry {
    /// Install the process-wide recorder. Fails if another recorder is already set.
    pub fn install(cfg: &NewsConfig) -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("installing prometheus recorder")?;

        describe_gauge!(
            "news_providers_configured",
            "Providers with an API key at startup."
        );
        describe_gauge!("news_max_articles", "Feed cap in effect.");
        gauge!("news_providers_configured").set(cfg.keys.configured_count() as f64);
        gauge!("news_max_articles").set(cfg.max_articles as f64);

        Ok(Self { handle })
    }

    /// Current exposition text.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// `GET /metrics`, merged next to the news routes.
    pub fn router(&self) -> Router {
        let this = self.clone();
        Router::new().route("/metrics", get(move || std::future::ready(this.render())))
    }
}
