// src/ingest/providers/gnews.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{get_json, map_entries, ProviderSettings, RawEntry};
use crate::article::Article;
use crate::ingest::types::NewsProvider;

pub const GNEWS_ENDPOINT: &str = "https://gnews.io/api/v4/search";

#[derive(Debug, Deserialize)]
struct GNewsResponse {
    articles: Option<Vec<Item>>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    source: Option<Source>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Source {
    name: Option<String>,
}

/// GNews search API. Its response already matches the common schema almost 1:1.
pub struct GNewsProvider {
    api_key: Option<String>,
    endpoint: String,
    settings: ProviderSettings,
}

impl GNewsProvider {
    pub fn new(api_key: Option<String>, settings: ProviderSettings) -> Self {
        Self {
            api_key,
            endpoint: GNEWS_ENDPOINT.to_string(),
            settings,
        }
    }

    pub fn with_base_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn parse_response(body: &str) -> Result<Vec<Article>> {
        let resp: GNewsResponse = serde_json::from_str(body).context("parsing gnews json")?;
        Ok(Self::map(resp))
    }

    fn map(resp: GNewsResponse) -> Vec<Article> {
        map_entries("GNews", resp.articles, |it| RawEntry {
            title: it.title,
            description: it.description,
            image: it.image,
            source: it.source.and_then(|s| s.name),
            published_at: it.published_at,
            url: it.url,
        })
    }
}

#[async_trait]
impl NewsProvider for GNewsProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };
        let s = &self.settings;
        let max = s.page_size_str();
        let query = [
            ("q", s.topic.as_str()),
            ("lang", s.language.as_str()),
            ("country", "us"),
            ("max", max.as_str()),
            ("apikey", key),
        ];
        let resp: GNewsResponse = get_json(s, self.name(), &self.endpoint, &query).await?;
        Ok(Self::map(resp))
    }

    fn name(&self) -> &'static str {
        "GNews"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
