//! Round aggregation: per-player bids and results for one round, plus the
//! lock state that freezes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::scoring::ScoringConfig;
use crate::domain::game::{Game, GameId, PlayerId, RoundId};
use crate::domain::rules::{clamp_to_round, tricks_available};
use crate::domain::scoring::{calculate_score, compute_bonus_from_specials, effective_bid, BonusPolicy};
use crate::domain::specials::SpecialCounts;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundBid {
    pub player_id: PlayerId,
    pub bid: u8,
    /// Harry shift; the raw `bid` stays what the player announced.
    pub harry_adjustment: i8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub tricks: u8,
    /// Manual bonus entered by the operator.
    pub bonus: i32,
    pub special_cards: SpecialCounts,
    /// Derived by the score calculator, never entered directly.
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,
    pub game_id: GameId,
    pub round_number: u8,
    pub bids: BTreeMap<PlayerId, RoundBid>,
    pub results: BTreeMap<PlayerId, RoundResult>,
    pub locked: bool,
}

impl Round {
    pub fn new(id: impl Into<RoundId>, game_id: impl Into<GameId>, round_number: u8) -> Self {
        Self {
            id: id.into(),
            game_id: game_id.into(),
            round_number,
            bids: BTreeMap::new(),
            results: BTreeMap::new(),
            locked: false,
        }
    }

    pub fn score_for(&self, player_id: &str) -> i32 {
        self.results.get(player_id).map_or(0, |r| r.score)
    }

    fn ensure_unlocked(&self) -> Result<(), DomainError> {
        if self.locked {
            return Err(DomainError::conflict(
                ConflictKind::RoundLocked,
                format!("round {} is locked; unlock it to edit", self.round_number),
            ));
        }
        Ok(())
    }
}

/// What the operator entered for one player at the results step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultInput {
    pub tricks: i32,
    pub bonus: i32,
    pub special_cards: SpecialCounts,
}

/// Return `existing`, or a fresh unlocked round with the given id.
pub fn ensure_round(
    game: &Game,
    round_number: u8,
    round_id: impl Into<RoundId>,
    existing: Option<Round>,
) -> Result<Round, DomainError> {
    if round_number < 1 || round_number > game.total_rounds {
        return Err(DomainError::validation(
            ValidationKind::RoundNumber,
            format!(
                "round {round_number} is outside 1..={} for game '{}'",
                game.total_rounds, game.id
            ),
        ));
    }

    match existing {
        Some(round) if round.game_id == game.id && round.round_number == round_number => Ok(round),
        Some(round) => Err(DomainError::validation(
            ValidationKind::RoundNumber,
            format!(
                "round '{}' belongs to game '{}' round {}, not game '{}' round {round_number}",
                round.id, round.game_id, round.round_number, game.id
            ),
        )),
        None => Ok(Round::new(round_id, game.id.clone(), round_number)),
    }
}

/// Record a bid, clamped into the round's bid range.
pub fn set_bid(
    round: &mut Round,
    player_id: &str,
    bid: i32,
    adjustment: i8,
) -> Result<(), DomainError> {
    round.ensure_unlocked()?;
    let bid = clamp_to_round(bid, round.round_number);
    round.bids.insert(
        player_id.to_string(),
        RoundBid {
            player_id: player_id.to_string(),
            bid,
            harry_adjustment: adjustment,
        },
    );
    Ok(())
}

/// Score a player's round and store the result.
///
/// A player without a recorded bid is scored as a zero bid.
pub fn set_result<'r>(
    round: &'r mut Round,
    player_id: &str,
    input: ResultInput,
    config: &ScoringConfig,
    policy: BonusPolicy,
) -> Result<&'r RoundResult, DomainError> {
    round.ensure_unlocked()?;
    let round_number = round.round_number;
    let tricks = clamp_to_round(input.tricks, round_number);
    let (bid, adjustment) = round
        .bids
        .get(player_id)
        .map_or((0, 0), |b| (b.bid, b.harry_adjustment));

    let effective = effective_bid(bid, adjustment, config);
    let specials_bonus = compute_bonus_from_specials(&input.special_cards, config);
    let bonus_term = policy.bonus_term(input.bonus, specials_bonus);
    let score = calculate_score(effective, tricks, round_number, bonus_term, config);

    let result = RoundResult {
        tricks,
        bonus: input.bonus,
        special_cards: input.special_cards,
        score,
    };
    round.results.insert(player_id.to_string(), result);
    Ok(&round.results[player_id])
}

pub fn lock(round: &mut Round) {
    round.locked = true;
}

pub fn unlock(round: &mut Round) {
    round.locked = false;
}

/// Every player of the game has both a bid and a result.
pub fn is_complete(round: &Round, game: &Game) -> bool {
    game.player_ids()
        .all(|pid| round.bids.contains_key(pid) && round.results.contains_key(pid))
}

/// Bid totals shown next to the tricks available. Display only: standard
/// rules do not require the two to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidSummary {
    pub total_bids: u32,
    pub tricks_available: u8,
    pub missing_bids: usize,
}

impl BidSummary {
    pub fn matches(&self) -> bool {
        self.total_bids == u32::from(self.tricks_available)
    }
}

pub fn bid_summary(round: &Round, game: &Game) -> BidSummary {
    let mut total_bids = 0u32;
    let mut missing_bids = 0usize;
    for pid in game.player_ids() {
        match round.bids.get(pid) {
            Some(b) => total_bids += u32::from(b.bid),
            None => missing_bids += 1,
        }
    }
    BidSummary {
        total_bids,
        tricks_available: tricks_available(round.round_number),
        missing_bids,
    }
}
