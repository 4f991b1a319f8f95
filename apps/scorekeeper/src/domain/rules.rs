use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const DEFAULT_TOTAL_ROUNDS: u8 = 10;

/// Manual bonus is edited in steps of this size.
pub const BONUS_STEP: i32 = 10;

/// Allowed "Harry the Giant" shifts of the effective bid.
pub const HARRY_ADJUSTMENT_RANGE: RangeInclusive<i8> = -2..=2;

pub fn player_count_range() -> RangeInclusive<usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

// Round N deals N cards to each player, so N tricks are available.
pub fn tricks_available(round_no: u8) -> u8 {
    round_no
}

pub fn valid_bid_range(round_no: u8) -> RangeInclusive<u8> {
    0..=tricks_available(round_no)
}

/// Clamp an operator-entered bid or trick count into `0..=round_no`.
pub fn clamp_to_round(value: i32, round_no: u8) -> u8 {
    let max = i32::from(tricks_available(round_no));
    value.clamp(0, max) as u8
}
