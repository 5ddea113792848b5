use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use crate::clients::anilist::AnilistClient;
use crate::config::Config;
use crate::constants::limits;
use crate::services::fetch::{CatalogFetcher, RatePolicy};
use crate::services::snapshot::write_snapshot;

pub async fn cmd_fetch(config: &Config) -> anyhow::Result<()> {
    println!("--- AniList Catalog Fetch ---");

    let client = AnilistClient::new(
        &config.api.url,
        Duration::from_secs(config.api.request_timeout_seconds),
    )
    .context("failed to build HTTP client")?;

    let fetcher = CatalogFetcher::new(
        client,
        config.api.page_size,
        RatePolicy::per_minute(config.api.max_requests_per_minute),
    );

    let outcome = fetcher.fetch_all().await;

    if outcome.records.is_empty() {
        match &outcome.error {
            Some(err) => println!("No data collected, nothing written: {err}"),
            None => println!("The catalog is empty, nothing written."),
        }
        return Ok(());
    }

    let snapshot_path = Path::new(&config.snapshot.path);
    write_snapshot(snapshot_path, &outcome.records)
        .with_context(|| format!("failed to write snapshot to {}", snapshot_path.display()))?;

    println!("{:-<70}", "");
    println!("Fetch complete!");
    println!("  Pages fetched: {}", outcome.pages_fetched);
    println!("  Records collected: {}", outcome.records.len());
    if let Some(err) = &outcome.error {
        println!("  Aborted early on page {}: {err}", err.page());
        println!("  A partial snapshot was written; re-run to retry from page 1.");
    }
    println!("Snapshot written to '{}'", snapshot_path.display());

    println!();
    println!(
        "Sample of the first {} entries:",
        outcome.records.len().min(limits::FETCH_SAMPLE_SIZE)
    );
    for record in outcome.records.iter().take(limits::FETCH_SAMPLE_SIZE) {
        println!("- {}", record.display_title());
    }

    Ok(())
}
