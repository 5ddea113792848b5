use crate::config::Config;
use crate::db::Store;
use crate::services::report::ReportRunner;

pub async fn cmd_report(config: &Config) -> anyhow::Result<()> {
    println!("--- Catalog Analysis ---");

    let store = Store::open_read_only(&config.general.database_path).await?;

    let failures = ReportRunner::new(store, config.reports.top_limit)
        .run_all()
        .await;

    println!();
    if failures > 0 {
        println!("Analysis finished with {failures} failed report(s); see log output.");
    } else {
        println!("Analysis complete.");
    }

    Ok(())
}
