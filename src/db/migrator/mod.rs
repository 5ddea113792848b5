use sea_orm_migration::prelude::*;

mod m20251012_create_animes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251012_create_animes::Migration)]
    }
}
