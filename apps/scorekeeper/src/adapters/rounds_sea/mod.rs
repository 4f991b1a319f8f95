//! SeaORM adapter for rounds.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::rounds;

pub mod dto;

pub use dto::{RoundUpsert, StoredRoundResult, ROUND_SCHEMA_VERSION};

/// Find all rounds for a game (ordered by round_no)
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::GameId.eq(game_id))
        .order_by_asc(rounds::Column::RoundNo)
        .all(conn)
        .await
}

/// Insert or overwrite a round by id. A second id for the same
/// `(game_id, round_no)` trips the unique index.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundUpsert,
) -> Result<(), sea_orm::DbErr> {
    rounds::Entity::insert(dto.into_active_model())
        .on_conflict(
            OnConflict::column(rounds::Column::Id)
                .update_columns([
                    rounds::Column::GameId,
                    rounds::Column::RoundNo,
                    rounds::Column::Locked,
                    rounds::Column::SchemaVersion,
                    rounds::Column::Bids,
                    rounds::Column::Results,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
