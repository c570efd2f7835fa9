// src/article.rs
//! Common article schema shared by every provider adapter and the merge pipeline.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used when a provider omits the source/author.
pub const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub image: String,
    pub source_name: String,
    pub published_at: String,
    pub url: String,
}

impl Article {
    /// Title and url are both required; whitespace-only counts as missing.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }

    /// Parsed `published_at`, or `None` when the provider sent something we can't read.
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_published(&self.published_at)
    }
}

/// Source name with the "Unknown" fallback for missing or blank values.
pub fn source_or_unknown(raw: Option<String>) -> String {
    match raw {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => UNKNOWN_SOURCE.to_string(),
    }
}

/// Parse the timestamp shapes the providers emit. Naive values are read as UTC.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Currents: "2024-01-02 10:00:00 +0000"
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
