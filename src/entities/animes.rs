use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog row. `id` is the surrogate key; `id_anilist` carries the UNIQUE
/// constraint that enforces at-most-one stored row per source entry across
/// all loader runs.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "animes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub id_anilist: i32,
    pub title_romaji: Option<String>,
    pub title_english: Option<String>,
    pub format: Option<String>,
    pub status: Option<String>,
    pub season_year: Option<i32>,
    pub episodes: Option<i32>,
    pub average_score: Option<f32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
