// src/ingest/providers/newsapi.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{get_json, map_entries, ProviderSettings, RawEntry};
use crate::article::Article;
use crate::ingest::types::NewsProvider;

pub const NEWSAPI_ENDPOINT: &str = "https://newsapi.org/v2/everything";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    articles: Option<Vec<Item>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    title: Option<String>,
    description: Option<String>,
    url_to_image: Option<String>,
    source: Option<Source>,
    published_at: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Source {
    name: Option<String>,
}

pub struct NewsApiProvider {
    api_key: Option<String>,
    endpoint: String,
    settings: ProviderSettings,
}

impl NewsApiProvider {
    pub fn new(api_key: Option<String>, settings: ProviderSettings) -> Self {
        Self {
            api_key,
            endpoint: NEWSAPI_ENDPOINT.to_string(),
            settings,
        }
    }

    pub fn with_base_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn parse_response(body: &str) -> Result<Vec<Article>> {
        let resp: NewsApiResponse = serde_json::from_str(body).context("parsing newsapi json")?;
        Ok(Self::map(resp))
    }

    fn map(resp: NewsApiResponse) -> Vec<Article> {
        map_entries("NewsAPI", resp.articles, |it| RawEntry {
            title: it.title,
            description: it.description,
            image: it.url_to_image,
            source: it.source.and_then(|s| s.name),
            published_at: it.published_at,
            url: it.url,
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    async fn fetch_latest(&self) -> Result<Vec<Article>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };
        let s = &self.settings;
        let page_size = s.page_size_str();
        let query = [
            ("q", s.topic.as_str()),
            ("language", s.language.as_str()),
            ("sortBy", "publishedAt"),
            ("pageSize", page_size.as_str()),
            ("apiKey", key),
        ];
        let resp: NewsApiResponse = get_json(s, self.name(), &self.endpoint, &query).await?;
        Ok(Self::map(resp))
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_to_image_becomes_image() {
        let body = r#"{"status": "ok", "articles": [
            {"source": {"id": null, "name": "The Verge"}, "author": "x",
             "title": "T", "description": "D", "url": "https://v/1",
             "urlToImage": "https://v/1.jpg", "publishedAt": "2024-01-02T10:00:00Z"}
        ]}"#;
        let out = NewsApiProvider::parse_response(body).unwrap();
        assert_eq!(out[0].image, "https://v/1.jpg");
        assert_eq!(out[0].source_name, "The Verge");
        assert_eq!(out[0].description, "D");
    }

    #[test]
    fn error_payload_without_articles_is_empty() {
        let body = r#"{"status": "error", "code": "apiKeyInvalid", "message": "nope"}"#;
        assert!(NewsApiProvider::parse_response(body).unwrap().is_empty());
    }
}
