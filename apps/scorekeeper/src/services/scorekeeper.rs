//! Scorekeeper service - the single owner of in-memory game state.
//!
//! Every mutation builds the new value from a clone, writes it through the
//! store and only then swaps it into memory, so a failed write leaves the
//! loaded state exactly as it was.

use time::OffsetDateTime;
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::config::scoring::{ScoringConfig, STANDARD_PRESET_ID};
use crate::domain::draft::RoundDraft;
use crate::domain::game::{self, Game, GameSetup, GameStatus, Player, RoundAdvance};
use crate::domain::round::{self, Round};
use crate::domain::rules::DEFAULT_TOTAL_ROUNDS;
use crate::domain::scoring::BonusPolicy;
use crate::domain::standings::{self, PlayerSeries, Standing};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::export::{self, ExportError, ExportFormat, ExportRow};
use crate::repos::GameStore;

/// Game shown by the shell, with its rounds sorted by round number.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGame {
    pub game: Game,
    pub rounds: Vec<Round>,
}

impl LoadedGame {
    pub fn round(&self, round_number: u8) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_number == round_number)
    }

    fn replace_round(&mut self, round: Round) {
        match self
            .rounds
            .iter_mut()
            .find(|r| r.round_number == round.round_number)
        {
            Some(slot) => *slot = round,
            None => {
                self.rounds.push(round);
                self.rounds.sort_by_key(|r| r.round_number);
            }
        }
    }

    /// Any bid or result recorded in any round.
    fn has_recorded_rounds(&self) -> bool {
        self.rounds
            .iter()
            .any(|r| !r.bids.is_empty() || !r.results.is_empty())
    }
}

/// Setup form as submitted by the shell. Players without an id get one.
#[derive(Debug, Clone, Default)]
pub struct NewGame {
    pub players: Vec<Player>,
    pub total_rounds: Option<u8>,
    pub scoring_preset_id: Option<String>,
    pub notes: Option<String>,
    pub date: Option<String>,
}

pub struct Scorekeeper<S: GameStore> {
    store: S,
    policy: BonusPolicy,
    games: Vec<Game>,
    current: Option<LoadedGame>,
}

impl<S: GameStore> Scorekeeper<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: BonusPolicy::default(),
            games: Vec::new(),
            current: None,
        }
    }

    pub fn with_policy(mut self, policy: BonusPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> BonusPolicy {
        self.policy
    }

    /// Last loaded game list, most recently updated first.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn current(&self) -> Option<&LoadedGame> {
        self.current.as_ref()
    }

    fn loaded(&self) -> Result<&LoadedGame, DomainError> {
        self.current
            .as_ref()
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "no game is loaded"))
    }

    fn scoring(&self) -> Result<&'static ScoringConfig, DomainError> {
        self.loaded()?.game.scoring()
    }

    // Keep the list in sync with a game that was just written.
    fn remember_game(&mut self, game: &Game) {
        self.games.retain(|g| g.id != game.id);
        self.games.push(game.clone());
        self.games
            .sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
    }

    pub async fn load_games(&mut self) -> Result<&[Game], DomainError> {
        let games = self.store.list_games().await?;
        debug!(count = games.len(), "games loaded");
        self.games = games;
        Ok(&self.games)
    }

    pub async fn load_game(&mut self, game_id: &str) -> Result<&LoadedGame, DomainError> {
        let game = self.store.get_game(game_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("game '{game_id}' not found"))
        })?;
        let mut rounds = self.store.get_rounds_for_game(game_id).await?;
        rounds.sort_by_key(|r| r.round_number);
        debug!(game_id, rounds = rounds.len(), "game loaded");
        Ok(self.current.insert(LoadedGame { game, rounds }))
    }

    pub async fn create_game(&mut self, setup: NewGame) -> Result<&LoadedGame, DomainError> {
        let players = setup
            .players
            .into_iter()
            .map(|mut p| {
                if p.id.trim().is_empty() {
                    p.id = Ulid::new().to_string();
                }
                p
            })
            .collect();
        let game = game::create_game(
            GameSetup {
                id: Ulid::new().to_string(),
                players,
                total_rounds: setup.total_rounds.unwrap_or(DEFAULT_TOTAL_ROUNDS),
                scoring_preset_id: setup
                    .scoring_preset_id
                    .unwrap_or_else(|| STANDARD_PRESET_ID.to_string()),
                notes: setup.notes,
                date: setup.date,
            },
            OffsetDateTime::now_utc(),
        )?;

        self.store.put_game(&game).await?;
        info!(
            game_id = %game.id,
            players = game.players.len(),
            total_rounds = game.total_rounds,
            "game created"
        );

        self.remember_game(&game);
        Ok(self.current.insert(LoadedGame {
            game,
            rounds: Vec::new(),
        }))
    }

    /// Make sure a round record exists. Rounds past the current one cannot
    /// be opened.
    pub async fn open_round(&mut self, round_number: u8) -> Result<&Round, DomainError> {
        let loaded = self.loaded()?;
        if round_number > loaded.game.current_round {
            return Err(DomainError::validation(
                ValidationKind::RoundNumber,
                format!(
                    "round {round_number} is ahead of the current round {}",
                    loaded.game.current_round
                ),
            ));
        }

        if loaded.round(round_number).is_none() {
            let round = round::ensure_round(&loaded.game, round_number, Ulid::new().to_string(), None)?;
            self.store.put_round(&round).await?;
            debug!(game_id = %round.game_id, round_no = round_number, "round opened");
            if let Some(current) = self.current.as_mut() {
                current.replace_round(round);
            }
        }

        self.loaded()?.round(round_number).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("round {round_number} missing"))
        })
    }

    /// Draft seeded from the stored round, or blank when none exists yet.
    pub fn draft(&self, round_number: u8) -> Result<RoundDraft, DomainError> {
        let loaded = self.loaded()?;
        Ok(RoundDraft::from_round(
            &loaded.game,
            round_number,
            loaded.round(round_number),
        ))
    }

    fn editable_round(&self, round_number: u8) -> Result<Round, DomainError> {
        let loaded = self.loaded()?;
        let existing = loaded.round(round_number).cloned();
        round::ensure_round(&loaded.game, round_number, Ulid::new().to_string(), existing)
    }

    pub async fn commit_bids(&mut self, draft: &RoundDraft) -> Result<&Round, DomainError> {
        let round_number = draft.round_number();
        let mut next = self.editable_round(round_number)?;
        draft.commit_bids(&mut next)?;

        self.store.put_round(&next).await?;
        debug!(game_id = %next.game_id, round_no = round_number, "bids committed");

        let current = self
            .current
            .as_mut()
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "no game is loaded"))?;
        current.replace_round(next);
        self.loaded()?.round(round_number).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("round {round_number} missing"))
        })
    }

    /// Score and lock the round, then move the game forward if this was the
    /// current round.
    pub async fn commit_results(
        &mut self,
        draft: &RoundDraft,
    ) -> Result<Option<RoundAdvance>, DomainError> {
        let round_number = draft.round_number();
        let config = self.scoring()?;
        let mut next = self.editable_round(round_number)?;
        draft.commit_results(&mut next, config, self.policy)?;
        round::lock(&mut next);

        self.store.put_round(&next).await?;
        let current = self
            .current
            .as_mut()
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "no game is loaded"))?;
        current.replace_round(next);

        let mut game = current.game.clone();
        let advance = game::record_commit(&mut game, round_number, &current.rounds);
        game.updated_at = OffsetDateTime::now_utc();
        self.store.put_game(&game).await?;

        match advance {
            Some(RoundAdvance::Advanced { to }) => {
                info!(game_id = %game.id, round_no = round_number, next_round = to, "round committed")
            }
            Some(RoundAdvance::Completed) => {
                info!(game_id = %game.id, round_no = round_number, "final round committed; game completed")
            }
            None => debug!(game_id = %game.id, round_no = round_number, "earlier round re-committed"),
        }

        self.remember_game(&game);
        if let Some(current) = self.current.as_mut() {
            current.game = game;
        }
        Ok(advance)
    }

    /// Reopen a locked round for corrections. Unlocking a round of a
    /// completed game puts the game back in progress.
    pub async fn unlock_round(&mut self, round_number: u8) -> Result<(), DomainError> {
        let loaded = self.loaded()?;
        let mut next = loaded.round(round_number).cloned().ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Round,
                format!("round {round_number} of game '{}' not found", loaded.game.id),
            )
        })?;
        round::unlock(&mut next);

        let mut game = loaded.game.clone();
        let reopened = game::reopen(&mut game);

        self.store.put_round(&next).await?;
        if let Some(current) = self.current.as_mut() {
            current.replace_round(next);
        }

        if reopened {
            game.updated_at = OffsetDateTime::now_utc();
            self.store.put_game(&game).await?;
            info!(game_id = %game.id, round_no = round_number, "completed game reopened for edits");
            self.remember_game(&game);
            if let Some(current) = self.current.as_mut() {
                current.game = game;
            }
        } else {
            debug!(game_id = %game.id, round_no = round_number, "round unlocked");
        }
        Ok(())
    }

    /// Manual override: mark the loaded game completed.
    pub async fn complete_game(&mut self) -> Result<(), DomainError> {
        let mut game = self.loaded()?.game.clone();
        if game.status == GameStatus::Completed {
            return Ok(());
        }
        game.status = GameStatus::Completed;
        game.updated_at = OffsetDateTime::now_utc();
        self.store.put_game(&game).await?;
        info!(game_id = %game.id, round = game.current_round, "game marked completed");

        self.remember_game(&game);
        if let Some(current) = self.current.as_mut() {
            current.game = game;
        }
        Ok(())
    }

    pub async fn delete_game(&mut self, game_id: &str) -> Result<(), DomainError> {
        self.store.delete_game(game_id).await?;
        self.games.retain(|g| g.id != game_id);
        if self.current.as_ref().is_some_and(|c| c.game.id == game_id) {
            self.current = None;
        }
        info!(game_id, "game deleted");
        Ok(())
    }

    pub async fn rename_player(&mut self, player_id: &str, name: &str) -> Result<(), DomainError> {
        let loaded = self.loaded()?;
        let mut game = loaded.game.clone();
        game::rename_player(&mut game, player_id, name, loaded.has_recorded_rounds())?;
        game.updated_at = OffsetDateTime::now_utc();
        self.store.put_game(&game).await?;

        self.remember_game(&game);
        if let Some(current) = self.current.as_mut() {
            current.game = game;
        }
        Ok(())
    }

    pub fn standings(&self) -> Result<Vec<Standing>, DomainError> {
        let loaded = self.loaded()?;
        Ok(standings::standings(&loaded.game, &loaded.rounds))
    }

    pub fn cumulative_series(&self) -> Result<Vec<PlayerSeries>, DomainError> {
        let loaded = self.loaded()?;
        Ok(standings::cumulative_series(&loaded.game, &loaded.rounds))
    }

    pub fn export_rows(&self) -> Result<Vec<ExportRow>, ExportError> {
        let loaded = self.current.as_ref().ok_or(ExportError::NoGame)?;
        let config = loaded.game.scoring()?;
        export::export_rows(&loaded.game, &loaded.rounds, config)
    }

    /// Encoded scoresheet of the loaded game.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
        let loaded = self.current.as_ref().ok_or(ExportError::NoGame)?;
        let config = loaded.game.scoring()?;
        let rows = export::export_rows(&loaded.game, &loaded.rounds, config)?;
        if rows.is_empty() {
            warn!(game_id = %loaded.game.id, "exporting a game with no recorded results");
        }
        export::encode(format, &export::header(config), &rows)
    }
}
