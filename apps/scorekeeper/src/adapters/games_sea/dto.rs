//! Row conversions for the games table.

use sea_orm::{DbErr, Set};

use crate::domain::game::{Game, GameStatus, Player};
use crate::entities::games;

/// Adapter-level marker for rows that do not decode into a domain game.
pub const CORRUPT_PREFIX: &str = "DATA_CORRUPTION:";

pub(crate) fn corrupt(detail: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(format!("{CORRUPT_PREFIX}{detail}"))
}

/// Full row image written on every save.
#[derive(Debug, Clone)]
pub struct GameUpsert {
    pub id: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
    pub status: String,
    pub players: serde_json::Value,
    pub total_rounds: i16,
    pub current_round: i16,
    pub scoring_preset_id: String,
    pub notes: Option<String>,
    pub date: Option<String>,
}

impl TryFrom<&Game> for GameUpsert {
    type Error = DbErr;

    fn try_from(game: &Game) -> Result<Self, Self::Error> {
        let players =
            serde_json::to_value(&game.players).map_err(|e| DbErr::Json(e.to_string()))?;
        Ok(Self {
            id: game.id.clone(),
            created_at: game.created_at,
            updated_at: game.updated_at,
            status: game.status.as_str().to_string(),
            players,
            total_rounds: i16::from(game.total_rounds),
            current_round: i16::from(game.current_round),
            scoring_preset_id: game.scoring_preset_id.clone(),
            notes: game.notes.clone(),
            date: game.date.clone(),
        })
    }
}

impl GameUpsert {
    pub fn into_active_model(self) -> games::ActiveModel {
        games::ActiveModel {
            id: Set(self.id),
            created_at: Set(self.created_at),
            updated_at: Set(self.updated_at),
            status: Set(self.status),
            players: Set(self.players),
            total_rounds: Set(self.total_rounds),
            current_round: Set(self.current_round),
            scoring_preset_id: Set(self.scoring_preset_id),
            notes: Set(self.notes),
            date: Set(self.date),
        }
    }
}

fn small_to_u8(value: i16, column: &str, id: &str) -> Result<u8, DbErr> {
    u8::try_from(value).map_err(|_| corrupt(format!("games.{column}={value} for game '{id}'")))
}

impl TryFrom<games::Model> for Game {
    type Error = DbErr;

    fn try_from(row: games::Model) -> Result<Self, Self::Error> {
        let status = GameStatus::parse(&row.status)
            .ok_or_else(|| corrupt(format!("games.status='{}' for game '{}'", row.status, row.id)))?;
        let players: Vec<Player> =
            serde_json::from_value(row.players).map_err(|e| DbErr::Json(e.to_string()))?;
        let total_rounds = small_to_u8(row.total_rounds, "total_rounds", &row.id)?;
        let current_round = small_to_u8(row.current_round, "current_round", &row.id)?;

        Ok(Game {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            status,
            players,
            total_rounds,
            current_round,
            scoring_preset_id: row.scoring_preset_id,
            notes: row.notes,
            date: row.date,
        })
    }
}
