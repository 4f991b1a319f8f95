//! Persistence contract for games and rounds.
//!
//! Stores are dumb: they keep whatever they are given and never apply game
//! rules. Ids are opaque strings chosen by the caller.

use async_trait::async_trait;

use crate::domain::game::Game;
use crate::domain::round::Round;
use crate::errors::domain::DomainError;

pub mod memory;

pub use memory::MemoryStore;

#[async_trait]
pub trait GameStore: Send + Sync {
    /// `Ok(None)` when no game has this id.
    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, DomainError>;

    /// Every game, most recently updated first.
    async fn list_games(&self) -> Result<Vec<Game>, DomainError>;

    /// Insert or replace by id.
    async fn put_game(&self, game: &Game) -> Result<(), DomainError>;

    /// Remove the game and all of its rounds. Deleting a missing id is a no-op.
    async fn delete_game(&self, game_id: &str) -> Result<(), DomainError>;

    /// Rounds of one game sorted by round number.
    async fn get_rounds_for_game(&self, game_id: &str) -> Result<Vec<Round>, DomainError>;

    /// Insert or replace by id.
    async fn put_round(&self, round: &Round) -> Result<(), DomainError>;
}
