use crate::config::scoring::ScoringConfig;
use crate::domain::specials::NetCount;

/// Whether the specials-derived bonus joins the manual bonus in the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BonusPolicy {
    /// Only the operator-entered bonus counts.
    #[default]
    ManualOnly,
    /// Manual bonus plus fixed-value special cards.
    ManualPlusSpecials,
}

impl BonusPolicy {
    pub fn bonus_term(self, manual: i32, specials: i32) -> i32 {
        match self {
            BonusPolicy::ManualOnly => manual,
            BonusPolicy::ManualPlusSpecials => manual.saturating_add(specials),
        }
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Score one player's round.
///
/// `tricks_won` is expected to be clamped into `0..=round_number` already.
/// The effective bid is not: a Harry shift may push it below zero or past
/// the tricks dealt, and both count as a miss.
pub fn calculate_score(
    effective_bid: i32,
    tricks_won: u8,
    round_number: u8,
    bonus: i32,
    config: &ScoringConfig,
) -> i32 {
    let bonus = i64::from(bonus);
    let round_number = i64::from(round_number);

    let points = if effective_bid == 0 {
        if tricks_won == 0 {
            i64::from(config.zero_bid_multiplier) * round_number
        } else {
            -i64::from(config.zero_bid_fail_multiplier) * round_number
        }
    } else if effective_bid == i32::from(tricks_won) {
        i64::from(effective_bid) * i64::from(config.points_per_successful_trick)
    } else {
        let diff = (i64::from(effective_bid) - i64::from(tricks_won)).abs();
        -diff * i64::from(config.failed_bid_penalty_per_trick)
    };

    saturate(points + bonus)
}

/// Sum of `net count × points` over specials with a fixed point value.
///
/// Unknown ids and variable-value specials contribute nothing.
pub fn compute_bonus_from_specials<'a, K, T, I>(specials: I, config: &ScoringConfig) -> i32
where
    I: IntoIterator<Item = (&'a K, &'a T)>,
    K: AsRef<str> + ?Sized + 'a,
    T: NetCount + 'a,
{
    let total: i64 = specials
        .into_iter()
        .filter_map(|(id, count)| {
            let points = config.rule(id.as_ref())?.points?;
            Some(i64::from(count.net_count()) * i64::from(points))
        })
        .sum();
    saturate(total)
}

/// Raw bid shifted by the Harry adjustment when the policy allows it.
pub fn effective_bid(bid: u8, adjustment: i8, config: &ScoringConfig) -> i32 {
    let shift = if config.allow_harry_adjustment {
        i32::from(adjustment)
    } else {
        0
    };
    i32::from(bid) + shift
}
