use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Status,
    Players,
    TotalRounds,
    CurrentRound,
    ScoringPresetId,
    Notes,
    Date,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    GameId,
    RoundNo,
    Locked,
    SchemaVersion,
    Bids,
    Results,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::Status)
                            .string()
                            .not_null()
                            .default("in-progress"),
                    )
                    .col(ColumnDef::new(Games::Players).json().not_null())
                    .col(ColumnDef::new(Games::TotalRounds).small_integer().not_null())
                    .col(
                        ColumnDef::new(Games::CurrentRound)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Games::ScoringPresetId).string().not_null())
                    .col(ColumnDef::new(Games::Notes).text().null())
                    .col(ColumnDef::new(Games::Date).string().null())
                    .to_owned(),
            )
            .await?;

        // Game list is shown most recently touched first
        manager
            .create_index(
                Index::create()
                    .name("ix_games_updated_at")
                    .table(Games::Table)
                    .col(Games::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Rounds::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Rounds::GameId).string().not_null())
                    .col(ColumnDef::new(Rounds::RoundNo).small_integer().not_null())
                    .col(
                        ColumnDef::new(Rounds::Locked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Rounds::SchemaVersion)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Rounds::Bids).json().not_null())
                    .col(ColumnDef::new(Rounds::Results).json().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_game_id")
                            .from(Rounds::Table, Rounds::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one row per (game, round number)
        manager
            .create_index(
                Index::create()
                    .name("ux_rounds_game_round_no")
                    .table(Rounds::Table)
                    .col(Rounds::GameId)
                    .col(Rounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(Rounds::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
