//! End-to-end flows through the domain API without storage.

use crate::domain::draft::RoundDraft;
use crate::domain::game::{record_commit, GameStatus, RoundAdvance};
use crate::domain::round::{ensure_round, lock, unlock};
use crate::domain::scoring::BonusPolicy;
use crate::domain::standings::standings;
use crate::domain::test_state_helpers::make_game;

#[test]
fn three_player_round_ranks_exact_bidders_first() {
    let mut game = make_game(3, 10);
    let config = game.scoring().unwrap();

    let mut round = ensure_round(&game, 1, "r1", None).unwrap();
    let mut draft = RoundDraft::from_round(&game, 1, Some(&round));
    // p1 bids 1 wins 1, p2 bids 0 wins 0, p3 bids 1 wins 0
    draft.set_bid("p1", 1).unwrap();
    draft.set_tricks("p1", 1).unwrap();
    draft.set_bid("p2", 0).unwrap();
    draft.set_bid("p3", 1).unwrap();

    draft
        .commit_results(&mut round, config, BonusPolicy::ManualOnly)
        .unwrap();
    lock(&mut round);
    let rounds = vec![round];
    assert_eq!(
        record_commit(&mut game, 1, &rounds),
        Some(RoundAdvance::Advanced { to: 2 })
    );

    assert_eq!(rounds[0].score_for("p1"), 20);
    assert_eq!(rounds[0].score_for("p2"), 10);
    assert_eq!(rounds[0].score_for("p3"), -10);

    let table = standings(&game, &rounds);
    let ranking: Vec<&str> = table.iter().map(|s| s.player_id.as_str()).collect();
    assert_eq!(ranking, vec!["p1", "p2", "p3"]);
}

#[test]
fn correcting_an_earlier_round_updates_standings_only() {
    let mut game = make_game(2, 2);
    let config = game.scoring().unwrap();

    let mut rounds = Vec::new();
    for n in 1..=2u8 {
        let mut round = ensure_round(&game, n, format!("r{n}"), None).unwrap();
        let mut draft = RoundDraft::from_round(&game, n, None);
        draft.set_bid("p1", 1).unwrap();
        draft.set_tricks("p1", 1).unwrap();
        draft.set_bid("p2", 1).unwrap();
        draft
            .commit_results(&mut round, config, BonusPolicy::ManualOnly)
            .unwrap();
        lock(&mut round);
        rounds.push(round);
        record_commit(&mut game, n, &rounds);
    }
    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(standings(&game, &rounds)[0].total, 40);

    // Fix round 1: p2 actually made their bid
    unlock(&mut rounds[0]);
    let mut draft = RoundDraft::from_round(&game, 1, Some(&rounds[0]));
    draft.set_tricks("p1", 0).unwrap();
    draft.set_tricks("p2", 1).unwrap();
    draft
        .commit_results(&mut rounds[0], config, BonusPolicy::ManualOnly)
        .unwrap();
    lock(&mut rounds[0]);
    assert_eq!(record_commit(&mut game, 1, &rounds), None);
    assert_eq!(game.current_round, 2);

    let table = standings(&game, &rounds);
    assert_eq!(table[0].player_id, "p1");
    assert_eq!(table[0].total, 10);
    assert_eq!(table[1].total, 10);
}
