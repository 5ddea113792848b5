use std::path::Path;

use anyhow::Context;

use crate::config::Config;
use crate::db::Store;
use crate::services::load::CatalogLoader;
use crate::services::snapshot::read_snapshot;

pub async fn cmd_load(config: &Config) -> anyhow::Result<()> {
    println!("--- Snapshot Load ---");

    let snapshot_path = Path::new(&config.snapshot.path);
    let records = read_snapshot(snapshot_path)?;
    println!(
        "{} records read from '{}'",
        records.len(),
        snapshot_path.display()
    );

    let store = Store::open(&config.general.database_path)
        .await
        .context("failed to open catalog database")?;

    println!("Inserting records...");
    let stats = CatalogLoader::new(store.clone()).load(&records).await?;

    let total = store.anime_count().await.unwrap_or_default();

    println!("{:-<70}", "");
    println!("Load complete!");
    println!("  Inserted: {}", stats.inserted);
    println!("  Skipped (duplicates): {}", stats.skipped);
    println!("  Rows in store: {total}");

    Ok(())
}
