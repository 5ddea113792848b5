use crate::entities::{animes, prelude::*};
use crate::models::anime::AnimeRecord;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, Set, SqlErr, Statement,
};

/// Result of attempting to store one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The external id was already present; the stored row was left as-is.
    Duplicate,
}

#[derive(Debug, FromQueryResult)]
pub struct TopRatedRow {
    pub title_english: Option<String>,
    pub average_score: f32,
    pub season_year: Option<i32>,
}

#[derive(Debug, FromQueryResult)]
pub struct YearCountRow {
    pub season_year: i32,
    pub total_animes: i64,
}

#[derive(Debug, FromQueryResult)]
pub struct FormatCountRow {
    pub format: String,
    pub total: i64,
}

pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a record keyed on its external id. First write wins: a
    /// uniqueness violation reports [`InsertOutcome::Duplicate`] and leaves
    /// the stored row untouched. Any other store error propagates.
    pub async fn insert_new(&self, record: &AnimeRecord) -> anyhow::Result<InsertOutcome> {
        let active_model = animes::ActiveModel {
            id_anilist: Set(record.id),
            title_romaji: Set(record.title.romaji.clone()),
            title_english: Set(record.title.english.clone()),
            format: Set(record.format.clone()),
            status: Set(record.status.clone()),
            season_year: Set(record.season_year),
            episodes: Set(record.episodes),
            average_score: Set(record.average_score),
            ..Default::default()
        };

        match Animes::insert(active_model).exec(&self.conn).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(InsertOutcome::Duplicate),
                _ => Err(err.into()),
            },
        }
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        Ok(Animes::find().count(&self.conn).await?)
    }

    pub async fn get_by_external_id(
        &self,
        id_anilist: i32,
    ) -> anyhow::Result<Option<animes::Model>> {
        Ok(Animes::find()
            .filter(animes::Column::IdAnilist.eq(id_anilist))
            .one(&self.conn)
            .await?)
    }

    /// Best-scored entries, scoreless rows excluded, ties broken by English
    /// title.
    pub async fn top_rated(&self, limit: u64) -> anyhow::Result<Vec<TopRatedRow>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT title_english, average_score, season_year \
             FROM animes \
             WHERE average_score IS NOT NULL \
             ORDER BY average_score DESC, title_english ASC \
             LIMIT ?",
            [limit.into()],
        );

        Ok(TopRatedRow::find_by_statement(stmt).all(&self.conn).await?)
    }

    pub async fn count_by_year(&self, limit: u64) -> anyhow::Result<Vec<YearCountRow>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT season_year, COUNT(id) AS total_animes \
             FROM animes \
             WHERE season_year IS NOT NULL \
             GROUP BY season_year \
             ORDER BY total_animes DESC \
             LIMIT ?",
            [limit.into()],
        );

        Ok(YearCountRow::find_by_statement(stmt).all(&self.conn).await?)
    }

    pub async fn count_by_format(&self) -> anyhow::Result<Vec<FormatCountRow>> {
        let stmt = Statement::from_string(
            DbBackend::Sqlite,
            "SELECT format, COUNT(id) AS total \
             FROM animes \
             WHERE format IS NOT NULL \
             GROUP BY format \
             ORDER BY total DESC"
                .to_string(),
        );

        Ok(FormatCountRow::find_by_statement(stmt)
            .all(&self.conn)
            .await?)
    }
}
