// src/ingest/providers/newsdata.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{get_json, map_entries, ProviderSettings, RawEntry};
use crate::article::Article;
use crate::ingest::types::NewsProvider;

pub const NEWSDATA_ENDPOINT: &str = "https://newsdata.io/api/1/news";

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    results: Option<Vec<Item>>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    source_id: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    link: Option<String>,
}

/// NewsData.io, restricted to the technology category.
pub struct NewsDataProvider {
    api_key: Option<String>,
    endpoint: String,
    settings: ProviderSettings,
}

impl NewsDataProvider {
    pub fn new(api_key: Option<String>, settings: ProviderSettings) -> Self {
        Self {
            api_key,
            endpoint: NEWSDATA_ENDPOINT.to_string(),
            settings,
        }
    }

    pub fn with_base_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn parse_response(body: &str) -> Result<Vec<Article>> {
        let resp: NewsDataResponse =
            serde_json::from_str(body).context("parsing newsdata json")?;
        Ok(Self::map(resp))
    }

    fn map(resp: NewsDataResponse) -> Vec<Article> {
        map_entries("NewsData", resp.results, |it| RawEntry {
            title: it.title,
            description: it.description,
            image: it.image_url,
            source: it.source_id,
            published_at: it.pub_date,
            url: it.link,
        })
    }
}

#[async_trait]
impl NewsProvider for NewsDataProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };
        let s = &self.settings;
        let size = s.page_size_str();
        let query = [
            ("apikey", key),
            ("q", s.topic.as_str()),
            ("language", s.language.as_str()),
            ("category", "technology"),
            ("size", size.as_str()),
        ];
        let resp: NewsDataResponse = get_json(s, self.name(), &self.endpoint, &query).await?;
        Ok(Self::map(resp))
    }

    fn name(&self) -> &'static str {
        "NewsData"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
