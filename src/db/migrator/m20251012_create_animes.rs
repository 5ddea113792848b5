use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Animes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Animes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Animes::IdAnilist)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Animes::TitleRomaji).string())
                    .col(ColumnDef::new(Animes::TitleEnglish).string())
                    .col(ColumnDef::new(Animes::Format).string())
                    .col(ColumnDef::new(Animes::Status).string())
                    .col(ColumnDef::new(Animes::SeasonYear).integer())
                    .col(ColumnDef::new(Animes::Episodes).integer())
                    .col(ColumnDef::new(Animes::AverageScore).float())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Animes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Animes {
    Table,
    Id,
    IdAnilist,
    TitleRomaji,
    TitleEnglish,
    Format,
    Status,
    SeasonYear,
    Episodes,
    AverageScore,
}
