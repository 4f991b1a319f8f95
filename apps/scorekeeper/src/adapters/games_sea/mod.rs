//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{games, rounds};

pub mod dto;

pub use dto::GameUpsert;

// Adapter functions return DbErr; the store maps to DomainError.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id.to_string()).one(conn).await
}

/// All games, most recently updated first
pub async fn list_recent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .order_by_desc(games::Column::UpdatedAt)
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}

/// Insert the game, or overwrite every column except `created_at`.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpsert,
) -> Result<(), sea_orm::DbErr> {
    games::Entity::insert(dto.into_active_model())
        .on_conflict(
            OnConflict::column(games::Column::Id)
                .update_columns([
                    games::Column::UpdatedAt,
                    games::Column::Status,
                    games::Column::Players,
                    games::Column::TotalRounds,
                    games::Column::CurrentRound,
                    games::Column::ScoringPresetId,
                    games::Column::Notes,
                    games::Column::Date,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}

/// Delete a game and its rounds. Run inside a transaction.
pub async fn delete_cascade<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    // Explicit so SQLite connections without foreign_keys still cascade
    rounds::Entity::delete_many()
        .filter(rounds::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    let res = games::Entity::delete_by_id(game_id.to_string())
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
