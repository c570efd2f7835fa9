// src/config/news.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

pub const ENV_NEWS_CONFIG_PATH: &str = "NEWS_CONFIG_PATH";
pub const DEFAULT_NEWS_CONFIG_PATH: &str = "config/news.toml";

pub const DEFAULT_TOPIC: &str = "artificial intelligence";
pub const DEFAULT_MAX_ARTICLES: usize = 30;

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}
fn default_language() -> String {
    "en".to_string()
}
fn default_page_size() -> u32 {
    10
}
fn default_revalidate_secs() -> u64 {
    3600
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_max_articles() -> usize {
    DEFAULT_MAX_ARTICLES
}

/// The news providers we know how to talk to, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    GNews,
    NewsApi,
    NewsData,
    Mediastack,
    NewsCatcher,
    Currents,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 6] = [
        ProviderKind::GNews,
        ProviderKind::NewsApi,
        ProviderKind::NewsData,
        ProviderKind::Mediastack,
        ProviderKind::NewsCatcher,
        ProviderKind::Currents,
    ];

    pub fn env_var(self) -> &'static str {
        match self {
            ProviderKind::GNews => "GNEWS_API_KEY",
            ProviderKind::NewsApi => "NEWS_API_KEY",
            ProviderKind::NewsData => "NEWSDATA_API_KEY",
            ProviderKind::Mediastack => "MEDIASTACK_API_KEY",
            ProviderKind::NewsCatcher => "NEWSCATCHER_API_KEY",
            ProviderKind::Currents => "CURRENTS_API_KEY",
        }
    }
}

/// One optional API key per provider. A missing key disables that provider only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderKeys {
    pub gnews: Option<String>,
    pub newsapi: Option<String>,
    pub newsdata: Option<String>,
    pub mediastack: Option<String>,
    pub newscatcher: Option<String>,
    pub currents: Option<String>,
}

impl ProviderKeys {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build keys from any name -> value lookup. Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |kind: ProviderKind| {
            lookup(kind.env_var())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            gnews: get(ProviderKind::GNews),
            newsapi: get(ProviderKind::NewsApi),
            newsdata: get(ProviderKind::NewsData),
            mediastack: get(ProviderKind::Mediastack),
            newscatcher: get(ProviderKind::NewsCatcher),
            currents: get(ProviderKind::Currents),
        }
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&str> {
        let v = match kind {
            ProviderKind::GNews => &self.gnews,
            ProviderKind::NewsApi => &self.newsapi,
            ProviderKind::NewsData => &self.newsdata,
            ProviderKind::Mediastack => &self.mediastack,
            ProviderKind::NewsCatcher => &self.newscatcher,
            ProviderKind::Currents => &self.currents,
        };
        v.as_deref()
    }

    pub fn configured_count(&self) -> usize {
        ProviderKind::ALL
            .iter()
            .filter(|k| self.get(**k).is_some())
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Articles requested per provider.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Freshness hint sent with every provider request (Cache-Control max-age).
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// Keys never come from the file, only from the environment.
    #[serde(skip)]
    pub keys: ProviderKeys,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            language: default_language(),
            page_size: default_page_size(),
            revalidate_secs: default_revalidate_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            max_articles: default_max_articles(),
            keys: ProviderKeys::default(),
        }
    }
}

impl NewsConfig {
    /// Defaults + API keys from the environment.
    pub fn from_env() -> Self {
        Self {
            keys: ProviderKeys::from_env(),
            ..Self::default()
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading news config from {}", path.display()))?;
        let mut cfg: NewsConfig = toml::from_str(&data)
            .with_context(|| format!("parsing news config {}", path.display()))?;
        cfg.sanitize();
        cfg.keys = ProviderKeys::from_env();
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $NEWS_CONFIG_PATH (must exist)
    /// 2) config/news.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_NEWS_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("NEWS_CONFIG_PATH points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        let fallback = PathBuf::from(DEFAULT_NEWS_CONFIG_PATH);
        if fallback.exists() {
            return Self::load_from_file(&fallback);
        }
        Ok(Self::from_env())
    }

    fn sanitize(&mut self) {
        if self.topic.trim().is_empty() {
            self.topic = default_topic();
        }
        if self.language.trim().is_empty() {
            self.language = default_language();
        }
        self.page_size = self.page_size.clamp(1, 100);
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = default_request_timeout_secs();
        }
        // The feed cap can be lowered, never raised.
        if self.max_articles == 0 {
            self.max_articles = default_max_articles();
        }
        self.max_articles = self.max_articles.min(DEFAULT_MAX_ARTICLES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_treats_blank_as_absent() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("GNEWS_API_KEY", " g-key "), ("NEWS_API_KEY", "   ")]);
        let keys = ProviderKeys::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(keys.get(ProviderKind::GNews), Some("g-key"));
        assert_eq!(keys.get(ProviderKind::NewsApi), None);
        assert_eq!(keys.configured_count(), 1);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let mut cfg: NewsConfig = toml::from_str(
            r#"
topic = ""
page_size = 0
request_timeout_secs = 0
max_articles = 500
"#,
        )
        .unwrap();
        cfg.sanitize();
        assert_eq!(cfg.topic, DEFAULT_TOPIC);
        assert_eq!(cfg.page_size, 1);
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.max_articles, DEFAULT_MAX_ARTICLES);
        assert_eq!(cfg.language, "en");
    }

    #[test]
    fn max_articles_can_only_be_lowered() {
        let mut cfg: NewsConfig = toml::from_str("max_articles = 80").unwrap();
        cfg.sanitize();
        assert_eq!(cfg.max_articles, DEFAULT_MAX_ARTICLES);

        let mut cfg: NewsConfig = toml::from_str("max_articles = 12").unwrap();
        cfg.sanitize();
        assert_eq!(cfg.max_articles, 12);
    }
}
