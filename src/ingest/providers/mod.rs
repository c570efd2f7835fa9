// src/ingest/providers/mod.rs
//! One adapter per news API. Shared plumbing: request settings, the JSON GET helper,
//! and the raw-entry -> `Article` normalizer every adapter funnels through.

pub mod currents;
pub mod gnews;
pub mod mediastack;
pub mod newsapi;
pub mod newscatcher;
pub mod newsdata;

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use metrics::{counter, histogram};
use reqwest::header::CACHE_CONTROL;
use serde::de::DeserializeOwned;

use crate::article::{source_or_unknown, Article};
use crate::config::NewsConfig;
use crate::ingest::normalize_text;

const USER_AGENT: &str = "ai-news-hub/0.1 (+github.com/lumlich/ai-news-hub)";

/// Query + transport settings shared by all adapters.
#[derive(Clone, Debug)]
pub struct ProviderSettings {
    pub client: reqwest::Client,
    pub topic: String,
    pub language: String,
    pub page_size: u32,
    pub revalidate_secs: u64,
    pub timeout: Duration,
}

impl ProviderSettings {
    pub fn from_config(cfg: &NewsConfig) -> Result<Self> {
        let timeout = Duration::from_secs(cfg.request_timeout_secs);
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .context("building reqwest client")?;
        Ok(Self {
            client,
            topic: cfg.topic.clone(),
            language: cfg.language.clone(),
            page_size: cfg.page_size,
            revalidate_secs: cfg.revalidate_secs,
            timeout,
        })
    }

    pub fn page_size_str(&self) -> String {
        self.page_size.to_string()
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        let cfg = NewsConfig::default();
        Self {
            client: reqwest::Client::new(),
            topic: cfg.topic,
            language: cfg.language,
            page_size: cfg.page_size,
            revalidate_secs: cfg.revalidate_secs,
            timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }
}

/// Single GET with the freshness hint; non-2xx and undecodable bodies are errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    settings: &ProviderSettings,
    provider: &'static str,
    endpoint: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    let t0 = Instant::now();
    let resp = settings
        .client
        .get(endpoint)
        .query(query)
        .header(CACHE_CONTROL, format!("max-age={}", settings.revalidate_secs))
        .timeout(settings.timeout)
        .send()
        .await
        .with_context(|| format!("{provider} http get"))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("{provider} responded with HTTP {status}");
    }
    let body = resp
        .json::<T>()
        .await
        .with_context(|| format!("decoding {provider} json"))?;

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("news_provider_fetch_ms", "provider" => provider).record(ms);
    Ok(body)
}

/// Provider entry after field mapping, before defaults are applied.
#[derive(Debug, Default)]
pub(crate) struct RawEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<String>,
    pub url: Option<String>,
}

impl RawEntry {
    pub fn into_article(self) -> Article {
        Article {
            title: normalize_text(self.title.as_deref().unwrap_or_default()),
            description: normalize_text(self.description.as_deref().unwrap_or_default()),
            image: trimmed(self.image),
            source_name: source_or_unknown(self.source),
            published_at: trimmed(self.published_at),
            url: trimmed(self.url),
        }
    }
}

fn trimmed(v: Option<String>) -> String {
    v.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Map a provider's (possibly absent) list of entries into articles.
pub(crate) fn map_entries<I, F>(provider: &'static str, items: Option<Vec<I>>, f: F) -> Vec<Article>
where
    F: Fn(I) -> RawEntry,
{
    let out: Vec<Article> = items
        .unwrap_or_default()
        .into_iter()
        .map(|it| f(it).into_article())
        .collect();
    counter!("news_provider_articles_total", "provider" => provider).increment(out.len() as u64);
    out
}
