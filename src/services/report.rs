//! Canned aggregate reports over the catalog store.
//!
//! Each report is read-only and isolated from the others: a failing query
//! logs the error and renders an empty table, and the run moves on.

use tracing::error;

use crate::constants::limits;
use crate::db::Store;

pub struct ReportRunner {
    store: Store,
    top_limit: u64,
}

impl ReportRunner {
    #[must_use]
    pub const fn new(store: Store, top_limit: u64) -> Self {
        Self { store, top_limit }
    }

    /// Runs the whole menu and returns how many reports failed.
    pub async fn run_all(&self) -> u32 {
        let mut failures = 0;

        println!();
        println!("[1] Top {} Anime by Average Score", self.top_limit);
        match self.store.top_rated(self.top_limit).await {
            Ok(rows) => {
                if rows.is_empty() {
                    println!("  (no rows)");
                } else {
                    println!("  {:<45} {:>6} {:>6}", "Title (English)", "Score", "Year");
                    for row in rows {
                        println!(
                            "  {:<45} {:>6.1} {:>6}",
                            row.title_english.as_deref().unwrap_or("-"),
                            row.average_score,
                            row.season_year
                                .map_or_else(|| "-".to_string(), |y| y.to_string()),
                        );
                    }
                }
            }
            Err(err) => {
                error!("top-rated query failed: {err:#}");
                println!("  (no rows)");
                failures += 1;
            }
        }

        println!();
        println!("[2] Anime Released per Year (Top {})", limits::YEAR_REPORT_ROWS);
        match self.store.count_by_year(limits::YEAR_REPORT_ROWS).await {
            Ok(rows) => {
                if rows.is_empty() {
                    println!("  (no rows)");
                } else {
                    println!("  {:>6} {:>8}", "Year", "Total");
                    for row in rows {
                        println!("  {:>6} {:>8}", row.season_year, row.total_animes);
                    }
                }
            }
            Err(err) => {
                error!("per-year count query failed: {err:#}");
                println!("  (no rows)");
                failures += 1;
            }
        }

        println!();
        println!("[3] Most Common Formats");
        match self.store.count_by_format().await {
            Ok(rows) => {
                if rows.is_empty() {
                    println!("  (no rows)");
                } else {
                    println!("  {:<12} {:>8}", "Format", "Total");
                    for row in rows {
                        println!("  {:<12} {:>8}", row.format, row.total);
                    }
                }
            }
            Err(err) => {
                error!("per-format count query failed: {err:#}");
                println!("  (no rows)");
                failures += 1;
            }
        }

        failures
    }
}
