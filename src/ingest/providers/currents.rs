// src/ingest/providers/currents.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{get_json, map_entries, ProviderSettings, RawEntry};
use crate::article::Article;
use crate::ingest::types::NewsProvider;

pub const CURRENTS_ENDPOINT: &str = "https://api.currentsapi.services/v1/search";

#[derive(Debug, Deserialize)]
struct CurrentsResponse {
    news: Option<Vec<Item>>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    author: Option<String>,
    published: Option<String>,
    url: Option<String>,
}

pub struct CurrentsProvider {
    api_key: Option<String>,
    endpoint: String,
    settings: ProviderSettings,
}

impl CurrentsProvider {
    pub fn new(api_key: Option<String>, settings: ProviderSettings) -> Self {
        Self {
            api_key,
            endpoint: CURRENTS_ENDPOINT.to_string(),
            settings,
        }
    }

    pub fn with_base_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn parse_response(body: &str) -> Result<Vec<Article>> {
        let resp: CurrentsResponse = serde_json::from_str(body).context("parsing currents json")?;
        Ok(Self::map(resp))
    }

    fn map(resp: CurrentsResponse) -> Vec<Article> {
        map_entries("Currents", resp.news, |it| RawEntry {
            title: it.title,
            description: it.description,
            // Currents sends the literal string "None" when there is no image.
            image: it.image.filter(|s| s != "None"),
            source: it.author,
            published_at: it.published,
            url: it.url,
        })
    }
}

#[async_trait]
impl NewsProvider for CurrentsProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };
        let s = &self.settings;
        // Currents has no page-size parameter.
        let query = [
            ("keywords", s.topic.as_str()),
            ("language", s.language.as_str()),
            ("apiKey", key),
        ];
        let resp: CurrentsResponse = get_json(s, self.name(), &self.endpoint, &query).await?;
        Ok(Self::map(resp))
    }

    fn name(&self) -> &'static str {
        "Currents"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
