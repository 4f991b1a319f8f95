use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::game::{Game, GameId, RoundId};
use crate::domain::round::Round;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::GameStore;

/// Process-local store for tests and sessions that do not need to survive
/// a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: RwLock<HashMap<GameId, Game>>,
    rounds: RwLock<HashMap<RoundId, Round>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, DomainError> {
        Ok(self.games.read().get(game_id).cloned())
    }

    async fn list_games(&self) -> Result<Vec<Game>, DomainError> {
        let mut games: Vec<Game> = self.games.read().values().cloned().collect();
        games.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(games)
    }

    async fn put_game(&self, game: &Game) -> Result<(), DomainError> {
        self.games.write().insert(game.id.clone(), game.clone());
        Ok(())
    }

    async fn delete_game(&self, game_id: &str) -> Result<(), DomainError> {
        // Lock order: games, then rounds
        let mut games = self.games.write();
        let mut rounds = self.rounds.write();
        games.remove(game_id);
        rounds.retain(|_, r| r.game_id != game_id);
        Ok(())
    }

    async fn get_rounds_for_game(&self, game_id: &str) -> Result<Vec<Round>, DomainError> {
        let mut rounds: Vec<Round> = self
            .rounds
            .read()
            .values()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| r.round_number);
        Ok(rounds)
    }

    async fn put_round(&self, round: &Round) -> Result<(), DomainError> {
        // Lock order: games, then rounds
        let games = self.games.read();
        if !games.contains_key(&round.game_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                "Round refers to a game that does not exist",
            ));
        }
        let mut rounds = self.rounds.write();
        // Same uniqueness rule as the (game_id, round_no) index
        let clash = rounds.values().any(|r| {
            r.id != round.id && r.game_id == round.game_id && r.round_number == round.round_number
        });
        if clash {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateRound,
                format!(
                    "game '{}' already has a round {}",
                    round.game_id, round.round_number
                ),
            ));
        }
        rounds.insert(round.id.clone(), round.clone());
        Ok(())
    }
}
