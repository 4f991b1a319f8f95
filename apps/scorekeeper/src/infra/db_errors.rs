//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; the store converts here so callers only
//! ever see `DomainError`.

use tracing::{error, warn};

use crate::adapters::games_sea::dto::CORRUPT_PREFIX;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Known unique indexes, by Postgres constraint name or SQLite column list.
fn map_unique_violation(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_rounds_game_round_no")
        || error_msg.contains("rounds.game_id, rounds.round_no")
    {
        return Some((
            ConflictKind::DuplicateRound,
            "A round with this number already exists for the game",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(msg) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), msg.clone());
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(CORRUPT_PREFIX) => {
            let detail = msg.trim_start_matches(CORRUPT_PREFIX);
            error!(detail, "Stored row failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, detail);
        }
        sea_orm::DbErr::Json(msg) => {
            error!(raw_error = %msg, "Stored JSON payload failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, msg.clone());
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        if let Some((kind, detail)) = map_unique_violation(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::not_found(NotFoundKind::Game, "Round refers to a game that does not exist");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::DbUnavailable, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
