use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::scoring::{require_preset, ScoringConfig};
use crate::domain::round::Round;
use crate::domain::rules::{player_count_range, MAX_PLAYERS, MIN_PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

pub type GameId = String;
pub type PlayerId = String;
pub type RoundId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    InProgress,
    Completed,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in-progress",
            GameStatus::Completed => "completed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "in-progress" => Some(GameStatus::InProgress),
            "completed" => Some(GameStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            emoji: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub status: GameStatus,
    pub players: Vec<Player>,
    pub total_rounds: u8,
    /// 1-indexed round currently being played.
    pub current_round: u8,
    pub scoring_preset_id: String,
    pub notes: Option<String>,
    /// Operator-chosen display date; exports fall back to `created_at`.
    pub date: Option<String>,
}

impl Game {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.id.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Resolve the scoring policy this game was created with.
    pub fn scoring(&self) -> Result<&'static ScoringConfig, DomainError> {
        require_preset(&self.scoring_preset_id)
    }
}

/// Everything the shell supplies to start a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub id: GameId,
    pub players: Vec<Player>,
    pub total_rounds: u8,
    pub scoring_preset_id: String,
    pub notes: Option<String>,
    pub date: Option<String>,
}

fn default_player_name(seat: usize) -> String {
    format!("Player {}", seat + 1)
}

/// Validate a setup and build an in-progress game at round 1.
pub fn create_game(setup: GameSetup, now: OffsetDateTime) -> Result<Game, DomainError> {
    if !player_count_range().contains(&setup.players.len()) {
        return Err(DomainError::validation(
            ValidationKind::PlayerCount,
            format!(
                "a game needs {MIN_PLAYERS}..={MAX_PLAYERS} players, got {}",
                setup.players.len()
            ),
        ));
    }
    if setup.total_rounds < 1 {
        return Err(DomainError::validation(
            ValidationKind::TotalRounds,
            "a game needs at least one round",
        ));
    }
    require_preset(&setup.scoring_preset_id)?;

    let mut seen = HashSet::new();
    for player in &setup.players {
        if !seen.insert(player.id.as_str()) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayer,
                format!("player id '{}' appears twice", player.id),
            ));
        }
    }

    let players = setup
        .players
        .into_iter()
        .enumerate()
        .map(|(seat, mut p)| {
            let trimmed = p.name.trim();
            p.name = if trimmed.is_empty() {
                default_player_name(seat)
            } else {
                trimmed.to_string()
            };
            p
        })
        .collect();

    Ok(Game {
        id: setup.id,
        created_at: now,
        updated_at: now,
        status: GameStatus::InProgress,
        players,
        total_rounds: setup.total_rounds,
        current_round: 1,
        scoring_preset_id: setup.scoring_preset_id,
        notes: setup.notes,
        date: setup.date,
    })
}

/// Outcome of moving a game past a committed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    Advanced { to: u8 },
    Completed,
}

/// Move to the next round, or complete the game after the last one.
pub fn advance_round(game: &mut Game) -> RoundAdvance {
    if game.current_round < game.total_rounds {
        game.current_round += 1;
        RoundAdvance::Advanced {
            to: game.current_round,
        }
    } else {
        game.status = GameStatus::Completed;
        RoundAdvance::Completed
    }
}

/// Progression hook run once a round has been locked.
///
/// Committing the current round advances the game. Re-committing an earlier
/// round never moves the pointer, except that a reopened game whose final
/// round is still locked completes again.
pub fn record_commit(game: &mut Game, round_number: u8, rounds: &[Round]) -> Option<RoundAdvance> {
    if game.is_completed() {
        return None;
    }
    if round_number == game.current_round {
        return Some(advance_round(game));
    }
    if round_number < game.current_round && game.current_round == game.total_rounds {
        let final_locked = rounds
            .iter()
            .any(|r| r.game_id == game.id && r.round_number == game.total_rounds && r.locked);
        if final_locked {
            game.status = GameStatus::Completed;
            return Some(RoundAdvance::Completed);
        }
    }
    None
}

/// Manual override: a completed game goes back to in-progress without
/// moving its round pointer. Returns whether anything changed.
pub fn reopen(game: &mut Game) -> bool {
    if game.is_completed() {
        game.status = GameStatus::InProgress;
        true
    } else {
        false
    }
}

/// Rename a player; only allowed before any round is recorded.
pub fn rename_player(
    game: &mut Game,
    player_id: &str,
    name: &str,
    has_rounds: bool,
) -> Result<(), DomainError> {
    if has_rounds {
        return Err(DomainError::validation(
            ValidationKind::RenameAfterStart,
            "players cannot be renamed once rounds are recorded",
        ));
    }
    let seat = game
        .players
        .iter()
        .position(|p| p.id == player_id)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("player '{player_id}' is not in game '{}'", game.id),
            )
        })?;

    let trimmed = name.trim();
    game.players[seat].name = if trimmed.is_empty() {
        default_player_name(seat)
    } else {
        trimmed.to_string()
    };
    Ok(())
}
