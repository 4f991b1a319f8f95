use crate::config::scoring::ScoringConfig;
use crate::domain::round::{
    bid_summary, ensure_round, is_complete, lock, set_bid, set_result, unlock, ResultInput, Round,
};
use crate::domain::scoring::BonusPolicy;
use crate::domain::specials::SpecialCount;
use crate::domain::test_state_helpers::make_game;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

fn result(tricks: i32, bonus: i32) -> ResultInput {
    ResultInput {
        tricks,
        bonus,
        ..ResultInput::default()
    }
}

#[test]
fn ensure_round_builds_fresh_unlocked_round() {
    let game = make_game(3, 10);
    let round = ensure_round(&game, 2, "r2", None).unwrap();
    assert_eq!(round.id, "r2");
    assert_eq!(round.game_id, game.id);
    assert_eq!(round.round_number, 2);
    assert!(round.bids.is_empty());
    assert!(round.results.is_empty());
    assert!(!round.locked);
}

#[test]
fn ensure_round_is_idempotent() {
    let game = make_game(3, 10);
    let first = ensure_round(&game, 1, "r1", None).unwrap();
    let again = ensure_round(&game, 1, "r1", None).unwrap();
    assert_eq!(first, again);

    let mut existing = first.clone();
    set_bid(&mut existing, "p1", 1, 0).unwrap();
    let kept = ensure_round(&game, 1, "ignored", Some(existing.clone())).unwrap();
    let kept_again = ensure_round(&game, 1, "ignored", Some(existing.clone())).unwrap();
    assert_eq!(kept, existing);
    assert_eq!(kept, kept_again);
}

#[test]
fn ensure_round_rejects_out_of_range_and_foreign_rounds() {
    let game = make_game(3, 4);
    for bad in [0u8, 5] {
        let err = ensure_round(&game, bad, "rx", None).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::RoundNumber, _)
        ));
    }

    let foreign = Round::new("r9", "other-game", 1);
    assert!(ensure_round(&game, 1, "r1", Some(foreign)).is_err());

    let wrong_number = Round::new("r2", game.id.clone(), 2);
    assert!(ensure_round(&game, 1, "r1", Some(wrong_number)).is_err());
}

#[test]
fn set_bid_clamps_and_keeps_other_players() {
    let mut round = Round::new("r3", "g1", 3);
    set_bid(&mut round, "p1", 2, 0).unwrap();
    set_bid(&mut round, "p2", 7, 1).unwrap();
    set_bid(&mut round, "p3", -4, -1).unwrap();

    assert_eq!(round.bids["p1"].bid, 2);
    assert_eq!(round.bids["p2"].bid, 3);
    assert_eq!(round.bids["p2"].harry_adjustment, 1);
    assert_eq!(round.bids["p3"].bid, 0);

    set_bid(&mut round, "p2", 1, 0).unwrap();
    assert_eq!(round.bids["p1"].bid, 2);
    assert_eq!(round.bids["p2"].bid, 1);
}

#[test]
fn set_result_scores_with_effective_bid() {
    let cfg = ScoringConfig::standard();
    let mut round = Round::new("r4", "g1", 4);
    // Raw bid 2, Harry +1 → effective 3
    set_bid(&mut round, "p1", 2, 1).unwrap();
    let stored = set_result(&mut round, "p1", result(3, 0), &cfg, BonusPolicy::ManualOnly).unwrap();
    assert_eq!(stored.score, 60);
    assert_eq!(round.bids["p1"].bid, 2, "raw bid is unchanged");

    // Without Harry the same tricks are a miss by one
    let no_harry = ScoringConfig {
        allow_harry_adjustment: false,
        ..ScoringConfig::standard()
    };
    let stored = set_result(&mut round, "p1", result(3, 0), &no_harry, BonusPolicy::ManualOnly)
        .unwrap();
    assert_eq!(stored.score, -10);
}

#[test]
fn set_result_does_not_clamp_harry_shifted_bid() {
    let cfg = ScoringConfig::standard();

    // Round 3: bid 3 + Harry 2 = 5, three tricks won → miss by two
    let mut round = Round::new("r3", "g1", 3);
    set_bid(&mut round, "p1", 3, 2).unwrap();
    let stored = set_result(&mut round, "p1", result(3, 0), &cfg, BonusPolicy::ManualOnly).unwrap();
    assert_eq!(stored.score, -20);

    // Round 1: bid 0 + Harry -1 = -1, no tricks → miss by one, not a zero-bid success
    let mut round = Round::new("r1", "g1", 1);
    set_bid(&mut round, "p1", 0, -1).unwrap();
    let stored = set_result(&mut round, "p1", result(0, 0), &cfg, BonusPolicy::ManualOnly).unwrap();
    assert_eq!(stored.score, -10);
}

#[test]
fn set_result_clamps_tricks_and_defaults_missing_bid_to_zero() {
    let cfg = ScoringConfig::standard();
    let mut round = Round::new("r2", "g1", 2);
    let stored = set_result(&mut round, "p1", result(9, 0), &cfg, BonusPolicy::ManualOnly).unwrap();
    assert_eq!(stored.tricks, 2);
    // No bid recorded → zero bid failed in round 2
    assert_eq!(stored.score, -20);
}

#[test]
fn set_result_keeps_manual_bonus_and_applies_policy() {
    let cfg = ScoringConfig::standard();
    let mut round = Round::new("r1", "g1", 1);
    set_bid(&mut round, "p1", 1, 0).unwrap();
    let input = ResultInput {
        tricks: 1,
        bonus: 10,
        special_cards: [("coins".to_string(), SpecialCount::new(2, 0))]
            .into_iter()
            .collect(),
    };

    let manual = set_result(&mut round, "p1", input.clone(), &cfg, BonusPolicy::ManualOnly)
        .unwrap()
        .clone();
    assert_eq!(manual.score, 30);
    assert_eq!(manual.bonus, 10);

    let summed = set_result(&mut round, "p1", input, &cfg, BonusPolicy::ManualPlusSpecials)
        .unwrap()
        .clone();
    assert_eq!(summed.score, 50);
    assert_eq!(summed.bonus, 10, "stored bonus stays the manual one");
    assert_eq!(summed.special_cards["coins"], SpecialCount::new(2, 0));
}

#[test]
fn locked_round_rejects_edits() {
    let cfg = ScoringConfig::standard();
    let mut round = Round::new("r1", "g1", 1);
    set_bid(&mut round, "p1", 1, 0).unwrap();
    lock(&mut round);

    let err = set_bid(&mut round, "p1", 0, 0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::RoundLocked, _)
    ));
    assert!(set_result(&mut round, "p1", result(1, 0), &cfg, BonusPolicy::ManualOnly).is_err());
    assert_eq!(round.bids["p1"].bid, 1);
}

#[test]
fn unlock_of_lock_only_flips_flag() {
    let cfg = ScoringConfig::standard();
    let mut round = Round::new("r2", "g1", 2);
    set_bid(&mut round, "p1", 2, 0).unwrap();
    set_result(&mut round, "p1", result(2, 10), &cfg, BonusPolicy::ManualOnly).unwrap();
    let original = round.clone();

    lock(&mut round);
    assert!(round.locked);
    unlock(&mut round);

    assert!(!round.locked);
    assert_eq!(round, original);
}

#[test]
fn completeness_requires_bid_and_result_for_every_player() {
    let cfg = ScoringConfig::standard();
    let game = make_game(2, 3);
    let mut round = ensure_round(&game, 1, "r1", None).unwrap();
    assert!(!is_complete(&round, &game));

    set_bid(&mut round, "p1", 1, 0).unwrap();
    set_bid(&mut round, "p2", 0, 0).unwrap();
    set_result(&mut round, "p1", result(1, 0), &cfg, BonusPolicy::ManualOnly).unwrap();
    assert!(!is_complete(&round, &game));

    set_result(&mut round, "p2", result(0, 0), &cfg, BonusPolicy::ManualOnly).unwrap();
    assert!(is_complete(&round, &game));
}

#[test]
fn bid_summary_flags_mismatch_without_enforcing() {
    let game = make_game(3, 10);
    let mut round = ensure_round(&game, 3, "r3", None).unwrap();
    set_bid(&mut round, "p1", 1, 0).unwrap();
    set_bid(&mut round, "p2", 1, 0).unwrap();

    let summary = bid_summary(&round, &game);
    assert_eq!(summary.total_bids, 2);
    assert_eq!(summary.tricks_available, 3);
    assert_eq!(summary.missing_bids, 1);
    assert!(!summary.matches());

    set_bid(&mut round, "p3", 1, 0).unwrap();
    let summary = bid_summary(&round, &game);
    assert_eq!(summary.missing_bids, 0);
    assert!(summary.matches());
}
