//! Stored round record and its versioned JSON payload.
//!
//! Version 1 rows carry bare integer special counts; version 2 rows carry
//! `{positive, negative}` pairs. Reads accept both, writes emit version 2.

use std::collections::BTreeMap;

use sea_orm::{DbErr, Set};
use serde::{Deserialize, Serialize};

use crate::adapters::games_sea::dto::corrupt;
use crate::domain::game::PlayerId;
use crate::domain::round::{Round, RoundBid, RoundResult};
use crate::domain::specials::{normalize_special_cards, SpecialTally};
use crate::entities::rounds;

pub const ROUND_SCHEMA_VERSION: i16 = 2;

/// Result as it sits in the `results` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRoundResult {
    pub tricks: u8,
    #[serde(default)]
    pub bonus: i32,
    #[serde(default)]
    pub special_cards: BTreeMap<String, SpecialTally>,
    #[serde(default)]
    pub score: i32,
}

impl From<&RoundResult> for StoredRoundResult {
    fn from(r: &RoundResult) -> Self {
        Self {
            tricks: r.tricks,
            bonus: r.bonus,
            special_cards: r
                .special_cards
                .iter()
                .map(|(id, count)| (id.clone(), SpecialTally::from(*count)))
                .collect(),
            score: r.score,
        }
    }
}

impl From<StoredRoundResult> for RoundResult {
    fn from(r: StoredRoundResult) -> Self {
        Self {
            tricks: r.tricks,
            bonus: r.bonus,
            special_cards: normalize_special_cards(r.special_cards),
            score: r.score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoundUpsert {
    pub id: String,
    pub game_id: String,
    pub round_no: i16,
    pub locked: bool,
    pub bids: serde_json::Value,
    pub results: serde_json::Value,
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, DbErr> {
    serde_json::to_value(value).map_err(|e| DbErr::Json(e.to_string()))
}

impl TryFrom<&Round> for RoundUpsert {
    type Error = DbErr;

    fn try_from(round: &Round) -> Result<Self, Self::Error> {
        let results: BTreeMap<&PlayerId, StoredRoundResult> = round
            .results
            .iter()
            .map(|(pid, r)| (pid, StoredRoundResult::from(r)))
            .collect();
        Ok(Self {
            id: round.id.clone(),
            game_id: round.game_id.clone(),
            round_no: i16::from(round.round_number),
            locked: round.locked,
            bids: to_json(&round.bids)?,
            results: to_json(&results)?,
        })
    }
}

impl RoundUpsert {
    pub fn into_active_model(self) -> rounds::ActiveModel {
        rounds::ActiveModel {
            id: Set(self.id),
            game_id: Set(self.game_id),
            round_no: Set(self.round_no),
            locked: Set(self.locked),
            schema_version: Set(ROUND_SCHEMA_VERSION),
            bids: Set(self.bids),
            results: Set(self.results),
        }
    }
}

impl TryFrom<rounds::Model> for Round {
    type Error = DbErr;

    fn try_from(row: rounds::Model) -> Result<Self, Self::Error> {
        if !(1..=ROUND_SCHEMA_VERSION).contains(&row.schema_version) {
            return Err(corrupt(format!(
                "rounds.schema_version={} for round '{}'",
                row.schema_version, row.id
            )));
        }
        let round_number = u8::try_from(row.round_no)
            .map_err(|_| corrupt(format!("rounds.round_no={} for round '{}'", row.round_no, row.id)))?;
        let bids: BTreeMap<PlayerId, RoundBid> =
            serde_json::from_value(row.bids).map_err(|e| DbErr::Json(e.to_string()))?;
        let stored: BTreeMap<PlayerId, StoredRoundResult> =
            serde_json::from_value(row.results).map_err(|e| DbErr::Json(e.to_string()))?;

        Ok(Round {
            id: row.id,
            game_id: row.game_id,
            round_number,
            bids,
            results: stored
                .into_iter()
                .map(|(pid, r)| (pid, RoundResult::from(r)))
                .collect(),
            locked: row.locked,
        })
    }
}
