//! Snapshot materialization into the catalog store.

use thiserror::Error;
use tracing::debug;

use crate::db::{InsertOutcome, Store};
use crate::models::anime::AnimeRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub inserted: u64,
    pub skipped: u64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// A store failure that is not a uniqueness violation. Duplicates are
    /// expected and counted; anything else (disk full, corrupt database)
    /// aborts the load so it cannot masquerade as a benign skip.
    #[error("store error inserting anime {id_anilist}: {message}")]
    Store { id_anilist: i32, message: String },
}

pub struct CatalogLoader {
    store: Store,
}

impl CatalogLoader {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Inserts every record, first-write-wins on the external id. Each
    /// insert is its own atomic unit; a duplicate never rolls back earlier
    /// inserts, and rows committed before a fatal error stay committed.
    pub async fn load(&self, records: &[AnimeRecord]) -> Result<LoadStats, LoadError> {
        let mut stats = LoadStats::default();

        for record in records {
            match self.store.insert_anime(record).await {
                Ok(InsertOutcome::Inserted) => stats.inserted += 1,
                Ok(InsertOutcome::Duplicate) => {
                    debug!("anime {} already stored, skipping", record.id);
                    stats.skipped += 1;
                }
                Err(err) => {
                    return Err(LoadError::Store {
                        id_anilist: record.id,
                        message: format!("{err:#}"),
                    });
                }
            }
        }

        Ok(stats)
    }
}
