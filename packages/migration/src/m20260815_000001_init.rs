use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    GoogleId,
    Email,
    Name,
    CreatedAt,
    LastLogin,
}

#[derive(Iden)]
enum GameProgress {
    Table,
    UserId,
    Points,
    TotalClicks,
    Level,
    PointsPerClick,
    PointsPerSecond,
    Upgrades,
    Achievements,
    SelectedSkin,
    OwnedSkins,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::GoogleId).text().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).text().not_null())
                    .col(ColumnDef::new(Users::Name).text().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::LastLogin)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // No column defaults here: new-player values are written explicitly by
        // the application so the no-row/has-row distinction stays visible.
        manager
            .create_table(
                Table::create()
                    .table(GameProgress::Table)
                    .col(
                        ColumnDef::new(GameProgress::UserId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameProgress::Points).double().not_null())
                    .col(ColumnDef::new(GameProgress::TotalClicks).big_integer().not_null())
                    .col(ColumnDef::new(GameProgress::Level).integer().not_null())
                    .col(ColumnDef::new(GameProgress::PointsPerClick).double().not_null())
                    .col(ColumnDef::new(GameProgress::PointsPerSecond).double().not_null())
                    .col(ColumnDef::new(GameProgress::Upgrades).json().not_null())
                    .col(ColumnDef::new(GameProgress::Achievements).json().not_null())
                    .col(ColumnDef::new(GameProgress::SelectedSkin).text().not_null())
                    .col(ColumnDef::new(GameProgress::OwnedSkins).json().not_null())
                    .col(
                        ColumnDef::new(GameProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_progress_user")
                            .from(GameProgress::Table, GameProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
