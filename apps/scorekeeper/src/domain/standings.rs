use std::collections::BTreeMap;

use crate::domain::game::{Game, PlayerId};
use crate::domain::round::Round;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub total: i32,
}

/// Running totals for one player, one entry per round number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSeries {
    pub player_id: PlayerId,
    pub totals: Vec<i32>,
}

// Only rounds of this game within 1..=total_rounds count.
fn rounds_by_number<'a>(game: &Game, rounds: &'a [Round]) -> BTreeMap<u8, &'a Round> {
    rounds
        .iter()
        .filter(|r| r.game_id == game.id && (1..=game.total_rounds).contains(&r.round_number))
        .map(|r| (r.round_number, r))
        .collect()
}

/// Players ranked by total score, highest first. Ties keep seating order.
pub fn standings(game: &Game, rounds: &[Round]) -> Vec<Standing> {
    let by_number = rounds_by_number(game, rounds);
    let mut table: Vec<Standing> = game
        .players
        .iter()
        .map(|p| Standing {
            player_id: p.id.clone(),
            name: p.name.clone(),
            total: by_number
                .values()
                .fold(0i32, |acc, r| acc.saturating_add(r.score_for(&p.id))),
        })
        .collect();

    // sort_by is stable
    table.sort_by(|a, b| b.total.cmp(&a.total));
    table
}

/// Cumulative score per round for every player. Rounds not yet recorded
/// carry the previous total forward.
pub fn cumulative_series(game: &Game, rounds: &[Round]) -> Vec<PlayerSeries> {
    let by_number = rounds_by_number(game, rounds);
    game.players
        .iter()
        .map(|p| {
            let mut running = 0i32;
            let totals = (1..=game.total_rounds)
                .map(|n| {
                    if let Some(r) = by_number.get(&n) {
                        running = running.saturating_add(r.score_for(&p.id));
                    }
                    running
                })
                .collect();
            PlayerSeries {
                player_id: p.id.clone(),
                totals,
            }
        })
        .collect()
}
