use time::macros::format_description;
use tracing::warn;

use crate::config::scoring::ScoringConfig;
use crate::domain::game::Game;
use crate::domain::round::Round;
use crate::domain::specials::SpecialCount;
use crate::export::ExportError;

/// One (round, player) line of the scoresheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub game_id: String,
    pub date: String,
    pub round: u8,
    pub player_id: String,
    pub player_name: String,
    pub bid: u8,
    /// Raw bid plus the Harry adjustment, unclamped.
    pub adjusted_bid: i32,
    pub tricks: u8,
    pub bonus: i32,
    /// One entry per special rule of the scoring config, in config order.
    pub specials: Vec<SpecialCount>,
    pub score: i32,
}

impl ExportRow {
    /// Cells in header order.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.game_id.clone(),
            self.date.clone(),
            self.round.to_string(),
            self.player_id.clone(),
            self.player_name.clone(),
            self.bid.to_string(),
            self.adjusted_bid.to_string(),
            self.tricks.to_string(),
            self.bonus.to_string(),
        ];
        for count in &self.specials {
            cells.push(count.positive.to_string());
            cells.push(count.negative.to_string());
        }
        cells.push(self.score.to_string());
        cells
    }
}

/// Column titles; special columns are `<id>_positive` and `<id>_negative`.
pub fn header(config: &ScoringConfig) -> Vec<String> {
    let mut cols: Vec<String> = [
        "game_id",
        "date",
        "round",
        "player_id",
        "player_name",
        "bid",
        "adjusted_bid",
        "tricks",
        "bonus",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    for id in config.special_ids() {
        cols.push(format!("{id}_positive"));
        cols.push(format!("{id}_negative"));
    }
    cols.push("score".to_string());
    cols
}

fn display_date(game: &Game) -> Result<String, ExportError> {
    match &game.date {
        Some(date) if !date.trim().is_empty() => Ok(date.clone()),
        _ => Ok(game
            .created_at
            .date()
            .format(format_description!("[year]-[month]-[day]"))?),
    }
}

/// Rows for every recorded result, by round number then seating order.
/// Results for ids no longer seated follow the seated players, named by id.
///
/// Special columns come from `config`; counts under ids the config does not
/// know (such as retired card types in old rounds) have no column and are
/// dropped with a warning.
pub fn export_rows(
    game: &Game,
    rounds: &[Round],
    config: &ScoringConfig,
) -> Result<Vec<ExportRow>, ExportError> {
    let date = display_date(game)?;

    let mut ordered: Vec<&Round> = rounds.iter().filter(|r| r.game_id == game.id).collect();
    ordered.sort_by_key(|r| r.round_number);

    let mut rows = Vec::new();
    for round in ordered {
        let seated = game.player_ids().filter(|pid| round.results.contains_key(*pid));
        let unseated = round
            .results
            .keys()
            .map(String::as_str)
            .filter(|pid| game.player(pid).is_none());

        for pid in seated.chain(unseated) {
            let Some(result) = round.results.get(pid) else {
                continue;
            };
            let (bid, adjustment) = round
                .bids
                .get(pid)
                .map_or((0, 0), |b| (b.bid, b.harry_adjustment));
            for special in result.special_cards.keys() {
                if config.rule(special).is_none() {
                    warn!(
                        game_id = %game.id,
                        round = round.round_number,
                        player_id = pid,
                        special = %special,
                        "special has no export column; dropped"
                    );
                }
            }
            let player_name = game
                .player(pid)
                .map_or_else(|| pid.to_string(), |p| p.name.clone());

            rows.push(ExportRow {
                game_id: game.id.clone(),
                date: date.clone(),
                round: round.round_number,
                player_id: pid.to_string(),
                player_name,
                bid,
                adjusted_bid: i32::from(bid) + i32::from(adjustment),
                tricks: result.tricks,
                bonus: result.bonus,
                specials: config
                    .special_ids()
                    .map(|id| result.special_cards.get(id).copied().unwrap_or_default())
                    .collect(),
                score: result.score,
            });
        }
    }
    Ok(rows)
}
