// src/ingest/providers/newscatcher.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{get_json, map_entries, ProviderSettings, RawEntry};
use crate::article::Article;
use crate::ingest::types::NewsProvider;

pub const NEWSCATCHER_ENDPOINT: &str = "https://api.newscatcher.com/v2/search";

#[derive(Debug, Deserialize)]
struct NewsCatcherResponse {
    articles: Option<Vec<Item>>,
}

// NewsCatcher names things differently: summary/media/author/link.
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    summary: Option<String>,
    media: Option<String>,
    author: Option<String>,
    published_date: Option<String>,
    link: Option<String>,
}

pub struct NewsCatcherProvider {
    api_key: Option<String>,
    endpoint: String,
    settings: ProviderSettings,
}

impl NewsCatcherProvider {
    pub fn new(api_key: Option<String>, settings: ProviderSettings) -> Self {
        Self {
            api_key,
            endpoint: NEWSCATCHER_ENDPOINT.to_string(),
            settings,
        }
    }

    pub fn with_base_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn parse_response(body: &str) -> Result<Vec<Article>> {
        let resp: NewsCatcherResponse =
            serde_json::from_str(body).context("parsing newscatcher json")?;
        Ok(Self::map(resp))
    }

    fn map(resp: NewsCatcherResponse) -> Vec<Article> {
        map_entries("NewsCatcher", resp.articles, |it| RawEntry {
            title: it.title,
            description: it.summary,
            image: it.media,
            source: it.author,
            published_at: it.published_date,
            url: it.link,
        })
    }
}

#[async_trait]
impl NewsProvider for NewsCatcherProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };
        let s = &self.settings;
        let page_size = s.page_size_str();
        let query = [
            ("q", s.topic.as_str()),
            ("lang", s.language.as_str()),
            ("page_size", page_size.as_str()),
            ("api_key", key),
        ];
        let resp: NewsCatcherResponse = get_json(s, self.name(), &self.endpoint, &query).await?;
        Ok(Self::map(resp))
    }

    fn name(&self) -> &'static str {
        "NewsCatcher"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
