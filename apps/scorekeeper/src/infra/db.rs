use std::time::Duration;

use migration::migrate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Connect for the given profile and bring the schema up to date.
///
/// In-memory SQLite is pinned to a single connection; a second connection
/// would open a different, empty database.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, DomainError> {
    let url = db_url(&profile)?;

    let mut opt = ConnectOptions::new(&url);
    opt.acquire_timeout(Duration::from_secs(2)).sqlx_logging(false);
    match profile {
        DbProfile::InMemory | DbProfile::SqliteFile { .. } => {
            opt.min_connections(1).max_connections(1);
        }
        DbProfile::Postgres => {
            opt.max_connections(4);
        }
    }

    let conn = Database::connect(opt).await.map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DbUnavailable,
            format!("failed to connect to {}: {e}", sanitize_db_url(&url)),
        )
    })?;

    migrate(&conn).await?;
    info!(db = %sanitize_db_url(&url), "database ready");
    Ok(conn)
}

/// Mask the password in a connection URL for logs.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth, host)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth.rfind(':') {
        Some(colon) if auth[..colon].contains("://") => {
            format!("{}:***@{host}", &auth[..colon])
        }
        _ => url.to_string(),
    }
}
