//! Uncommitted edits for one round, owned by the presentation layer.
//!
//! The draft keeps raw operator input (unclamped bids and tricks, running
//! bonus) and only touches a [`Round`] through the aggregator when committed.

use crate::config::scoring::ScoringConfig;
use crate::domain::game::{Game, PlayerId};
use crate::domain::round::{self, ResultInput, Round};
use crate::domain::rules::{clamp_to_round, BONUS_STEP, HARRY_ADJUSTMENT_RANGE};
use crate::domain::scoring::{calculate_score, compute_bonus_from_specials, effective_bid, BonusPolicy};
use crate::domain::specials::{SpecialCount, SpecialCounts};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDraft {
    pub bid: i32,
    pub harry: i8,
    pub tricks: i32,
    pub bonus: i32,
    pub special_cards: SpecialCounts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundDraft {
    round_number: u8,
    /// Seating order of the game.
    entries: Vec<(PlayerId, PlayerDraft)>,
}

impl RoundDraft {
    /// Seed a draft from the stored round, defaulting missing entries to zero.
    pub fn from_round(game: &Game, round_number: u8, round: Option<&Round>) -> Self {
        let entries = game
            .players
            .iter()
            .map(|p| {
                let bid = round.and_then(|r| r.bids.get(&p.id));
                let result = round.and_then(|r| r.results.get(&p.id));
                let draft = PlayerDraft {
                    bid: bid.map_or(0, |b| i32::from(b.bid)),
                    harry: bid.map_or(0, |b| b.harry_adjustment),
                    tricks: result.map_or(0, |r| i32::from(r.tricks)),
                    bonus: result.map_or(0, |r| r.bonus),
                    special_cards: result.map(|r| r.special_cards.clone()).unwrap_or_default(),
                };
                (p.id.clone(), draft)
            })
            .collect();

        Self {
            round_number,
            entries,
        }
    }

    pub fn round_number(&self) -> u8 {
        self.round_number
    }

    pub fn entry(&self, player_id: &str) -> Option<&PlayerDraft> {
        self.entries
            .iter()
            .find(|entry| entry.0 == player_id)
            .map(|(_, d)| d)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &PlayerDraft)> {
        self.entries.iter().map(|(pid, d)| (pid.as_str(), d))
    }

    fn entry_mut(&mut self, player_id: &str) -> Result<&mut PlayerDraft, DomainError> {
        self.entries
            .iter_mut()
            .find(|entry| entry.0 == player_id)
            .map(|(_, d)| d)
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownPlayer,
                    format!("player '{player_id}' is not part of this round"),
                )
            })
    }

    pub fn set_bid(&mut self, player_id: &str, bid: i32) -> Result<(), DomainError> {
        self.entry_mut(player_id)?.bid = bid;
        Ok(())
    }

    pub fn set_harry(&mut self, player_id: &str, adjustment: i8) -> Result<(), DomainError> {
        if !HARRY_ADJUSTMENT_RANGE.contains(&adjustment) {
            return Err(DomainError::validation(
                ValidationKind::HarryAdjustment,
                format!(
                    "Harry adjustment {adjustment} is outside {}..={}",
                    HARRY_ADJUSTMENT_RANGE.start(),
                    HARRY_ADJUSTMENT_RANGE.end()
                ),
            ));
        }
        self.entry_mut(player_id)?.harry = adjustment;
        Ok(())
    }

    pub fn set_tricks(&mut self, player_id: &str, tricks: i32) -> Result<(), DomainError> {
        self.entry_mut(player_id)?.tricks = tricks;
        Ok(())
    }

    /// Move the manual bonus by whole steps (negative steps subtract).
    pub fn bump_bonus(&mut self, player_id: &str, steps: i32) -> Result<i32, DomainError> {
        let entry = self.entry_mut(player_id)?;
        entry.bonus = entry.bonus.saturating_add(steps.saturating_mul(BONUS_STEP));
        Ok(entry.bonus)
    }

    pub fn set_special(
        &mut self,
        player_id: &str,
        special_id: &str,
        count: SpecialCount,
    ) -> Result<(), DomainError> {
        let entry = self.entry_mut(player_id)?;
        if count.is_zero() {
            entry.special_cards.remove(special_id);
        } else {
            entry.special_cards.insert(special_id.to_string(), count);
        }
        Ok(())
    }

    /// Sum of raw bids as currently entered.
    pub fn total_bids(&self) -> i32 {
        self.entries
            .iter()
            .map(|(_, d)| i32::from(clamp_to_round(d.bid, self.round_number)))
            .sum()
    }

    /// Score the player would get if the draft were committed now.
    pub fn projected_score(
        &self,
        player_id: &str,
        config: &ScoringConfig,
        policy: BonusPolicy,
    ) -> Option<i32> {
        let d = self.entry(player_id)?;
        let bid = clamp_to_round(d.bid, self.round_number);
        let tricks = clamp_to_round(d.tricks, self.round_number);
        let effective = effective_bid(bid, d.harry, config);
        let specials = compute_bonus_from_specials(&d.special_cards, config);
        Some(calculate_score(
            effective,
            tricks,
            self.round_number,
            policy.bonus_term(d.bonus, specials),
            config,
        ))
    }

    fn check_round(&self, target: &Round) -> Result<(), DomainError> {
        if target.round_number != self.round_number {
            return Err(DomainError::validation(
                ValidationKind::RoundNumber,
                format!(
                    "draft for round {} cannot be committed into round {}",
                    self.round_number, target.round_number
                ),
            ));
        }
        Ok(())
    }

    /// Write every player's bid and Harry adjustment into the round.
    pub fn commit_bids(&self, target: &mut Round) -> Result<(), DomainError> {
        self.check_round(target)?;
        for (pid, d) in &self.entries {
            round::set_bid(target, pid, d.bid, d.harry)?;
        }
        Ok(())
    }

    /// Write bids and scored results for every player. The round is not
    /// locked here; locking belongs to the caller's commit flow.
    pub fn commit_results(
        &self,
        target: &mut Round,
        config: &ScoringConfig,
        policy: BonusPolicy,
    ) -> Result<(), DomainError> {
        self.commit_bids(target)?;
        for (pid, d) in &self.entries {
            let input = ResultInput {
                tricks: d.tricks,
                bonus: d.bonus,
                special_cards: d.special_cards.clone(),
            };
            round::set_result(target, pid, input, config, policy)?;
        }
        Ok(())
    }
}
