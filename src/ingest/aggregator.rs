// src/ingest/aggregator.rs
use anyhow::Result;
use tracing::info;

use crate::article::Article;
use crate::config::{NewsConfig, ProviderKind};
use crate::ingest::merge::MAX_ARTICLES;
use crate::ingest::providers::{
    currents::CurrentsProvider, gnews::GNewsProvider, mediastack::MediastackProvider,
    newsapi::NewsApiProvider, newscatcher::NewsCatcherProvider, newsdata::NewsDataProvider,
    ProviderSettings,
};
use crate::ingest::types::NewsProvider;

/// Registered providers + result cap. Stateless between calls.
pub struct NewsAggregator {
    providers: Vec<Box<dyn NewsProvider>>,
    limit: usize,
}

impl NewsAggregator {
    pub fn new(providers: Vec<Box<dyn NewsProvider>>) -> Self {
        Self {
            providers,
            limit: MAX_ARTICLES,
        }
    }

    /// Lower the feed cap; values above `MAX_ARTICLES` are clamped to it.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_ARTICLES);
        self
    }

    /// Register the built-in adapters in fixed order. Order matters: on duplicate
    /// urls the earlier provider's copy is kept.
    pub fn from_config(cfg: &NewsConfig) -> Result<Self> {
        let settings = ProviderSettings::from_config(cfg)?;
        let key = |k: ProviderKind| cfg.keys.get(k).map(str::to_string);

        let providers: Vec<Box<dyn NewsProvider>> = vec![
            Box::new(GNewsProvider::new(key(ProviderKind::GNews), settings.clone())),
            Box::new(NewsApiProvider::new(key(ProviderKind::NewsApi), settings.clone())),
            Box::new(NewsDataProvider::new(key(ProviderKind::NewsData), settings.clone())),
            Box::new(MediastackProvider::new(key(ProviderKind::Mediastack), settings.clone())),
            Box::new(NewsCatcherProvider::new(key(ProviderKind::NewsCatcher), settings.clone())),
            Box::new(CurrentsProvider::new(key(ProviderKind::Currents), settings)),
        ];

        info!(
            configured = cfg.keys.configured_count(),
            total = providers.len(),
            "news providers registered"
        );
        Ok(Self::new(providers).with_limit(cfg.max_articles))
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// The whole pipeline. Always returns a list, possibly empty.
    pub async fn get_news(&self) -> Vec<Article> {
        crate::ingest::run_once(&self.providers, self.limit).await.0
    }
}
