// src/ingest/providers/mediastack.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{get_json, map_entries, ProviderSettings, RawEntry};
use crate::article::Article;
use crate::ingest::types::NewsProvider;

pub const MEDIASTACK_ENDPOINT: &str = "https://api.mediastack.com/v1/news";

#[derive(Debug, Deserialize)]
struct MediastackResponse {
    data: Option<Vec<Item>>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    source: Option<String>,
    published_at: Option<String>,
    url: Option<String>,
}

pub struct MediastackProvider {
    api_key: Option<String>,
    endpoint: String,
    settings: ProviderSettings,
}

impl MediastackProvider {
    pub fn new(api_key: Option<String>, settings: ProviderSettings) -> Self {
        Self {
            api_key,
            endpoint: MEDIASTACK_ENDPOINT.to_string(),
            settings,
        }
    }

    pub fn with_base_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn parse_response(body: &str) -> Result<Vec<Article>> {
        let resp: MediastackResponse =
            serde_json::from_str(body).context("parsing mediastack json")?;
        Ok(Self::map(resp))
    }

    fn map(resp: MediastackResponse) -> Vec<Article> {
        map_entries("Mediastack", resp.data, |it| RawEntry {
            title: it.title,
            description: it.description,
            image: it.image,
            source: it.source,
            published_at: it.published_at,
            url: it.url,
        })
    }
}

#[async_trait]
impl NewsProvider for MediastackProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };
        let s = &self.settings;
        let limit = s.page_size_str();
        let query = [
            ("access_key", key),
            ("keywords", s.topic.as_str()),
            ("languages", s.language.as_str()),
            ("limit", limit.as_str()),
        ];
        let resp: MediastackResponse = get_json(s, self.name(), &self.endpoint, &query).await?;
        Ok(Self::map(resp))
    }

    fn name(&self) -> &'static str {
        "Mediastack"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
