use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::{FormatCountRow, InsertOutcome, TopRatedRow, YearCountRow};

use crate::models::anime::AnimeRecord;
use repositories::catalog::CatalogRepository;

/// Facade over the catalog database. [`Store::open`] creates the file and
/// applies migrations (the loader path); [`Store::open_read_only`] attaches
/// to an existing database without touching it (the report path).
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn open(db_url: &str) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create database directory for {db_url}"))?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("failed to create database file {path_str}"))?;
            }
        }

        let conn = Self::connect(db_url).await?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("failed to apply database migrations")?;

        info!("Database connected & migrations applied");

        Ok(Self { conn })
    }

    /// Read-only attach; fails when the database file does not exist rather
    /// than creating an empty one.
    pub async fn open_read_only(db_url: &str) -> Result<Self> {
        let path_str = db_url.trim_start_matches("sqlite:");
        if !db_url.contains(":memory:") && !Path::new(path_str).exists() {
            anyhow::bail!("catalog database not found: {path_str} (run the load stage first)");
        }

        let ro_url = format!("sqlite:{path_str}?mode=ro");
        let conn = Self::connect(&ro_url).await?;

        let store = Self { conn };
        store.ping().await.context("database is not readable")?;
        Ok(store)
    }

    async fn connect(db_url: &str) -> Result<DatabaseConnection> {
        // An in-memory sqlite database exists per connection; pooling more
        // than one would hand out empty databases.
        let max_connections = if db_url.contains(":memory:") { 1 } else { 2 };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .with_context(|| format!("failed to open database {db_url}"))
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn catalog_repo(&self) -> CatalogRepository {
        CatalogRepository::new(self.conn.clone())
    }

    pub async fn insert_anime(&self, record: &AnimeRecord) -> Result<InsertOutcome> {
        self.catalog_repo().insert_new(record).await
    }

    pub async fn anime_count(&self) -> Result<u64> {
        self.catalog_repo().count().await
    }

    pub async fn get_anime_by_external_id(
        &self,
        id_anilist: i32,
    ) -> Result<Option<crate::entities::animes::Model>> {
        self.catalog_repo().get_by_external_id(id_anilist).await
    }

    pub async fn top_rated(&self, limit: u64) -> Result<Vec<TopRatedRow>> {
        self.catalog_repo().top_rated(limit).await
    }

    pub async fn count_by_year(&self, limit: u64) -> Result<Vec<YearCountRow>> {
        self.catalog_repo().count_by_year(limit).await
    }

    pub async fn count_by_format(&self) -> Result<Vec<FormatCountRow>> {
        self.catalog_repo().count_by_format().await
    }
}
