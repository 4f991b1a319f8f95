use crate::domain::round::Round;
use crate::domain::standings::{cumulative_series, standings};
use crate::domain::test_state_helpers::{make_game, scored_round};

#[test]
fn no_rounds_means_everyone_at_zero_in_seat_order() {
    let game = make_game(3, 5);
    let table = standings(&game, &[]);
    let ids: Vec<&str> = table.iter().map(|s| s.player_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
    assert!(table.iter().all(|s| s.total == 0));
}

#[test]
fn ties_keep_seating_order() {
    let game = make_game(3, 5);
    // p1 and p3 both score 20, p2 scores -10
    let rounds = vec![scored_round(&game, 1, &[("p1", 1, 1), ("p2", 1, 0), ("p3", 1, 1)])];
    let table = standings(&game, &rounds);
    let ids: Vec<&str> = table.iter().map(|s| s.player_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3", "p2"]);
    assert_eq!(table[0].name, "Player 1");
}

#[test]
fn rounds_from_other_games_and_out_of_range_are_ignored() {
    let game = make_game(2, 2);
    let mut foreign = scored_round(&game, 1, &[("p1", 1, 1)]);
    foreign.game_id = "other".to_string();
    let mut stray = scored_round(&game, 2, &[("p1", 1, 1)]);
    stray.round_number = 3;

    let table = standings(&game, &[foreign, stray]);
    assert!(table.iter().all(|s| s.total == 0));
}

#[test]
fn missing_results_count_as_zero() {
    let game = make_game(2, 3);
    let mut round = Round::new("r1", game.id.clone(), 1);
    round.locked = true;
    let table = standings(&game, &[round]);
    assert!(table.iter().all(|s| s.total == 0));
}

#[test]
fn cumulative_series_carries_totals_forward() {
    let game = make_game(2, 4);
    let rounds = vec![
        scored_round(&game, 1, &[("p1", 1, 1), ("p2", 0, 0)]),
        scored_round(&game, 3, &[("p1", 0, 1), ("p2", 3, 3)]),
    ];
    let series = cumulative_series(&game, &rounds);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].player_id, "p1");
    assert_eq!(series[0].totals, vec![20, 20, -10, -10]);
    assert_eq!(series[1].totals, vec![10, 10, 70, 70]);

    let table = standings(&game, &rounds);
    assert_eq!(table[0].total, *series[1].totals.last().unwrap());
}
