// src/ingest/mod.rs
pub mod aggregator;
pub mod merge;
pub mod providers;
pub mod types;

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use crate::article::Article;
use crate::ingest::merge::{merge_with_stats, MergeStats};
use crate::ingest::types::NewsProvider;
use futures::FutureExt;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_raw_articles_total",
            "Articles returned by providers before merging."
        );
        describe_counter!(
            "news_provider_articles_total",
            "Articles mapped per provider."
        );
        describe_counter!(
            "news_provider_errors_total",
            "Provider fetch/parse errors."
        );
        describe_counter!(
            "news_invalid_total",
            "Articles dropped for missing title or url."
        );
        describe_counter!("news_dedup_total", "Articles dropped as duplicate urls.");
        describe_histogram!(
            "news_fetch_duration_ms",
            "Wall time of the concurrent provider fan-out in milliseconds."
        );
        describe_histogram!(
            "news_provider_fetch_ms",
            "Single provider request time in milliseconds."
        );
        describe_gauge!(
            "news_pipeline_last_run_ts",
            "Unix ts when the news pipeline last ran."
        );
    });
}

/// Normalize provider text: decode entities, strip tags, collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| {
        regex::Regex::new(r"(?is)</?[a-z!][^>]*>").expect("static tag regex")
    });
    out = re_tags.replace_all(&out, "").to_string();

    // 3) Collapse whitespace (incl. nbsp)
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"[\s\u{00A0}]+").expect("static ws regex"));
    out = re_ws.replace_all(&out, " ").to_string();
    out = out.trim().to_string();

    // 4) Length cap: 1500 chars
    if out.chars().count() > 1500 {
        out = out.chars().take(1500).collect();
    }

    out
}

/// Fan out to every provider at once and wait for all of them to settle.
/// Results are concatenated in registration order; failures contribute nothing.
pub async fn gather_all(providers: &[Box<dyn NewsProvider>]) -> Vec<Article> {
    ensure_metrics_described();

    let t0 = Instant::now();
    // A panicking provider settles as empty like any other failure.
    let per_provider = futures::future::join_all(providers.iter().map(|p| async move {
        match AssertUnwindSafe(p.fetch()).catch_unwind().await {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(provider = p.name(), "provider panicked");
                counter!("news_provider_errors_total", "provider" => p.name()).increment(1);
                Vec::new()
            }
        }
    }))
    .await;

    let mut raw = Vec::with_capacity(per_provider.iter().map(Vec::len).sum());
    for (p, mut articles) in providers.iter().zip(per_provider) {
        tracing::debug!(target: "news", provider = p.name(), count = articles.len(), "provider settled");
        raw.append(&mut articles);
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("news_fetch_duration_ms").record(ms);
    counter!("news_raw_articles_total").increment(raw.len() as u64);
    raw
}

/// Gather + merge once. Returns the final feed and what the merge dropped.
pub async fn run_once(
    providers: &[Box<dyn NewsProvider>],
    limit: usize,
) -> (Vec<Article>, MergeStats) {
    let raw = gather_all(providers).await;
    let raw_len = raw.len();
    let (kept, stats) = merge_with_stats(raw, limit);

    // Telemetry
    let now = chrono::Utc::now().timestamp().max(0);
    counter!("news_invalid_total").increment(stats.invalid as u64);
    counter!("news_dedup_total").increment(stats.duplicates as u64);
    gauge!("news_pipeline_last_run_ts").set(now as f64);

    tracing::info!(
        target: "news",
        raw = raw_len,
        kept = kept.len(),
        invalid = stats.invalid,
        dedup = stats.duplicates,
        truncated = stats.truncated,
        "news pipeline run"
    );

    (kept, stats)
}
