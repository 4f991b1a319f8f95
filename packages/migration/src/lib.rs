pub use sea_orm_migration::prelude::*;
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20240309_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240309_000001_init::Migration)]
    }
}

/// Bring the scorekeeper schema up to date. Safe to call on every connect.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let pending: Vec<String> = Migrator::get_pending_migrations(db)
        .await?
        .iter()
        .map(|m| m.name().to_string())
        .collect();

    if pending.is_empty() {
        tracing::debug!(backend = ?backend, "schema up to date");
        return Ok(());
    }

    match Migrator::up(db, None).await {
        Ok(()) => {
            tracing::info!(backend = ?backend, applied = ?pending, "schema migrated");
            Ok(())
        }
        Err(e) => {
            tracing::error!(backend = ?backend, pending = ?pending, error = %e, "schema migration failed");
            Err(e)
        }
    }
}
