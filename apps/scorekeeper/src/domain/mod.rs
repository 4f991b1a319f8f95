//! Domain layer: pure scoring and round-state logic.

pub mod draft;
pub mod game;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod specials;
pub mod standings;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_game;
#[cfg(test)]
mod tests_integration;
#[cfg(test)]
mod tests_round;
#[cfg(test)]
mod tests_standings;

// Re-exports for ergonomics
pub use draft::{PlayerDraft, RoundDraft};
pub use game::{advance_round, create_game, record_commit, reopen, GameSetup, RoundAdvance};
pub use round::{bid_summary, ensure_round, is_complete, lock, set_bid, set_result, unlock, BidSummary, ResultInput};
pub use scoring::{calculate_score, compute_bonus_from_specials, effective_bid, BonusPolicy};
pub use specials::{normalize_special_cards, SpecialCount, SpecialCounts, SpecialTally};
pub use standings::{cumulative_series, standings, PlayerSeries, Standing};
