#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod export;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use config::db::{db_url, DbProfile};
pub use config::scoring::{ScoringConfig, SpecialRule};
pub use domain::game::{Game, GameSetup, GameStatus, Player};
pub use domain::round::{Round, RoundBid, RoundResult};
pub use errors::domain::DomainError;
pub use infra::db::connect_db;
pub use repos::{GameStore, MemoryStore};
pub use adapters::SeaStore;
pub use services::scorekeeper::Scorekeeper;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
