use std::env;

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Where the scoresheet database lives
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Private in-memory SQLite database (tests, throwaway sessions)
    InMemory,
    /// SQLite file; falls back to `SCOREKEEPER_SQLITE_FILE` when `file` is None
    SqliteFile { file: Option<String> },
    /// PostgreSQL built from environment variables
    Postgres,
}

/// Builds a database URL for the given profile
pub fn db_url(profile: &DbProfile) -> Result<String, DomainError> {
    match profile {
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile { file } => {
            let file = match file {
                Some(f) => f.clone(),
                None => must_var("SCOREKEEPER_SQLITE_FILE")?,
            };
            Ok(format!("sqlite://{file}?mode=rwc"))
        }
        DbProfile::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("SCOREKEEPER_DB")?;
            let username = must_var("SCOREKEEPER_DB_USER")?;
            let password = must_var("SCOREKEEPER_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, DomainError> {
    env::var(name).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::Config,
            format!("Required environment variable '{name}' is not set"),
        )
    })
}
