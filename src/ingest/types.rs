// src/ingest/types.rs
use anyhow::Result;
use metrics::counter;

use crate::article::Article;

#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    /// One request to the provider, mapped into the common schema.
    async fn fetch_latest(&self) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
    /// False when the provider has no API key; `fetch` then skips the network.
    fn is_configured(&self) -> bool {
        true
    }

    /// Total variant used by the orchestrator: never fails, empty on any error.
    async fn fetch(&self) -> Vec<Article> {
        if !self.is_configured() {
            tracing::debug!(provider = self.name(), "provider not configured, skipping");
            return Vec::new();
        }
        match self.fetch_latest().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = ?e, provider = self.name(), "provider error");
                counter!("news_provider_errors_total", "provider" => self.name()).increment(1);
                Vec::new()
            }
        }
    }
}
