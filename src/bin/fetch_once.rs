//! Runs the news pipeline once and prints the feed as JSON (stdout), logs to stderr.

use ai_news_hub::{NewsAggregator, NewsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = NewsConfig::load_default()?;
    let aggregator = NewsAggregator::from_config(&cfg)?;
    let articles = aggregator.get_news().await;

    println!("{}", serde_json::to_string_pretty(&articles)?);
    Ok(())
}
