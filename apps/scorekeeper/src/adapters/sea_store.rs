use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::debug;

use crate::adapters::games_sea::{self, GameUpsert};
use crate::adapters::rounds_sea::{self, RoundUpsert};
use crate::domain::game::Game;
use crate::domain::round::Round;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::GameStore;

/// `GameStore` over a SeaORM connection (SQLite or Postgres).
#[derive(Debug, Clone)]
pub struct SeaStore {
    conn: DatabaseConnection,
}

impl SeaStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

#[async_trait]
impl GameStore for SeaStore {
    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, DomainError> {
        let row = games_sea::find_by_id(&self.conn, game_id).await?;
        row.map(Game::try_from).transpose().map_err(map_db_err)
    }

    async fn list_games(&self) -> Result<Vec<Game>, DomainError> {
        let rows = games_sea::list_recent(&self.conn).await?;
        rows.into_iter()
            .map(|row| Game::try_from(row).map_err(map_db_err))
            .collect()
    }

    async fn put_game(&self, game: &Game) -> Result<(), DomainError> {
        let dto = GameUpsert::try_from(game)?;
        games_sea::upsert(&self.conn, dto).await?;
        debug!(game_id = %game.id, status = game.status.as_str(), current_round = game.current_round, "game saved");
        Ok(())
    }

    async fn delete_game(&self, game_id: &str) -> Result<(), DomainError> {
        let txn = self.conn.begin().await?;
        let removed = games_sea::delete_cascade(&txn, game_id).await?;
        txn.commit().await?;
        debug!(game_id, removed, "game deleted");
        Ok(())
    }

    async fn get_rounds_for_game(&self, game_id: &str) -> Result<Vec<Round>, DomainError> {
        let rows = rounds_sea::find_all_by_game(&self.conn, game_id).await?;
        rows.into_iter()
            .map(|row| Round::try_from(row).map_err(map_db_err))
            .collect()
    }

    async fn put_round(&self, round: &Round) -> Result<(), DomainError> {
        let dto = RoundUpsert::try_from(round)?;
        rounds_sea::upsert(&self.conn, dto).await?;
        debug!(
            game_id = %round.game_id,
            round_no = round.round_number,
            locked = round.locked,
            "round saved"
        );
        Ok(())
    }
}
