// src/ingest/merge.rs
//! Validate -> dedup by url -> newest first -> cap. Pure, never fails.

use std::collections::HashSet;

use crate::article::Article;

pub const MAX_ARTICLES: usize = 30;

/// What each stage removed; feeds metrics and the per-run log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub invalid: usize,
    pub duplicates: usize,
    pub truncated: usize,
}

pub fn merge(raw: Vec<Article>) -> Vec<Article> {
    merge_with_limit(raw, MAX_ARTICLES)
}

pub fn merge_with_limit(raw: Vec<Article>, limit: usize) -> Vec<Article> {
    merge_with_stats(raw, limit).0
}

pub fn merge_with_stats(raw: Vec<Article>, limit: usize) -> (Vec<Article>, MergeStats) {
    let limit = limit.min(MAX_ARTICLES);
    let mut stats = MergeStats::default();

    // 1) Validate
    let total = raw.len();
    let valid: Vec<Article> = raw.into_iter().filter(Article::is_valid).collect();
    stats.invalid = total - valid.len();

    // 2) Dedup: first occurrence of a url wins (adapter registration order).
    //    Keyed on the trimmed url, same as validation.
    let mut seen: HashSet<String> = HashSet::with_capacity(valid.len());
    let mut unique = Vec::with_capacity(valid.len());
    for a in valid {
        if seen.insert(a.url.trim().to_string()) {
            unique.push(a);
        } else {
            stats.duplicates += 1;
        }
    }

    // 3) Sort newest first. `None` orders below any `Some`, so unparseable
    //    timestamps land at the end; sort_by is stable for ties.
    let mut keyed: Vec<_> = unique
        .into_iter()
        .map(|a| (a.published_at_utc(), a))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    // 4) Cap
    stats.truncated = keyed.len().saturating_sub(limit);
    let out = keyed.into_iter().take(limit).map(|(_, a)| a).collect();
    (out, stats)
}
