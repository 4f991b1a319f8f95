use time::macros::datetime;

use crate::config::scoring::STANDARD_PRESET_ID;
use crate::domain::game::{
    advance_round, create_game, record_commit, rename_player, reopen, GameSetup, GameStatus,
    Player, RoundAdvance,
};
use crate::domain::test_state_helpers::{make_game, scored_round};
use crate::errors::domain::{DomainError, ValidationKind};

fn setup(players: Vec<Player>, total_rounds: u8) -> GameSetup {
    GameSetup {
        id: "g-setup".to_string(),
        players,
        total_rounds,
        scoring_preset_id: STANDARD_PRESET_ID.to_string(),
        notes: Some("friday".to_string()),
        date: Some("2024-03-09".to_string()),
    }
}

fn seats(n: usize) -> Vec<Player> {
    (1..=n).map(|i| Player::new(format!("p{i}"), format!("P{i}"))).collect()
}

#[test]
fn create_game_starts_at_round_one() {
    let now = datetime!(2024-03-09 20:15 UTC);
    let game = create_game(setup(seats(3), 10), now).unwrap();
    assert_eq!(game.status, GameStatus::InProgress);
    assert_eq!(game.current_round, 1);
    assert_eq!(game.total_rounds, 10);
    assert_eq!(game.created_at, now);
    assert_eq!(game.updated_at, now);
    assert_eq!(game.notes.as_deref(), Some("friday"));
    assert!(game.scoring().is_ok());
}

#[test]
fn create_game_rejects_bad_player_counts() {
    let now = datetime!(2024-03-09 20:15 UTC);
    for n in [0usize, 1, 11] {
        let err = create_game(setup(seats(n), 10), now).unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::PlayerCount, _)),
            "{n} players should be rejected"
        );
    }
    assert!(create_game(setup(seats(2), 10), now).is_ok());
    assert!(create_game(setup(seats(10), 10), now).is_ok());
}

#[test]
fn create_game_rejects_zero_rounds_unknown_preset_and_duplicates() {
    let now = datetime!(2024-03-09 20:15 UTC);

    let err = create_game(setup(seats(3), 0), now).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::TotalRounds, _)
    ));

    let mut unknown = setup(seats(3), 10);
    unknown.scoring_preset_id = "house-rules".to_string();
    let err = create_game(unknown, now).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownScoringPreset, _)
    ));

    let dup = vec![Player::new("p1", "A"), Player::new("p1", "B")];
    let err = create_game(setup(dup, 10), now).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::DuplicatePlayer, _)
    ));
}

#[test]
fn blank_names_fall_back_to_seat_label() {
    let now = datetime!(2024-03-09 20:15 UTC);
    let players = vec![Player::new("a", "  Ann "), Player::new("b", "   ")];
    let game = create_game(setup(players, 10), now).unwrap();
    assert_eq!(game.players[0].name, "Ann");
    assert_eq!(game.players[1].name, "Player 2");
}

#[test]
fn advance_round_moves_then_completes() {
    let mut game = make_game(2, 2);
    assert_eq!(advance_round(&mut game), RoundAdvance::Advanced { to: 2 });
    assert_eq!(game.current_round, 2);
    assert_eq!(advance_round(&mut game), RoundAdvance::Completed);
    assert_eq!(game.current_round, 2);
    assert!(game.is_completed());
}

#[test]
fn committing_earlier_round_does_not_move_pointer() {
    let mut game = make_game(2, 5);
    game.current_round = 3;
    let rounds = vec![scored_round(&game, 1, &[("p1", 1, 1)])];
    assert_eq!(record_commit(&mut game, 1, &rounds), None);
    assert_eq!(game.current_round, 3);
    assert_eq!(game.status, GameStatus::InProgress);
}

#[test]
fn committing_current_round_advances() {
    let mut game = make_game(2, 5);
    let rounds = vec![scored_round(&game, 1, &[("p1", 1, 1)])];
    assert_eq!(
        record_commit(&mut game, 1, &rounds),
        Some(RoundAdvance::Advanced { to: 2 })
    );
}

#[test]
fn completed_game_ignores_commits() {
    let mut game = make_game(2, 1);
    let rounds = vec![scored_round(&game, 1, &[("p1", 1, 1)])];
    assert_eq!(
        record_commit(&mut game, 1, &rounds),
        Some(RoundAdvance::Completed)
    );
    assert_eq!(record_commit(&mut game, 1, &rounds), None);
    assert!(game.is_completed());
}

#[test]
fn reopened_game_completes_again_when_final_round_locked() {
    let mut game = make_game(2, 2);
    let rounds = vec![
        scored_round(&game, 1, &[("p1", 1, 1)]),
        scored_round(&game, 2, &[("p1", 1, 1)]),
    ];
    game.current_round = 2;
    game.status = GameStatus::Completed;

    assert!(reopen(&mut game));
    assert!(!reopen(&mut game));
    assert_eq!(game.current_round, 2);

    assert_eq!(
        record_commit(&mut game, 1, &rounds),
        Some(RoundAdvance::Completed)
    );
    assert!(game.is_completed());
}

#[test]
fn rename_only_before_rounds_exist() {
    let mut game = make_game(2, 3);
    rename_player(&mut game, "p1", " Captain ", false).unwrap();
    assert_eq!(game.players[0].name, "Captain");

    rename_player(&mut game, "p2", "", false).unwrap();
    assert_eq!(game.players[1].name, "Player 2");

    let err = rename_player(&mut game, "p1", "Late", true).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RenameAfterStart, _)
    ));
    let err = rename_player(&mut game, "zz", "Ghost", false).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::UnknownPlayer, _)
    ));
}

#[test]
fn game_serializes_status_kebab_case() {
    let game = make_game(2, 3);
    let json = serde_json::to_value(&game).unwrap();
    assert_eq!(json["status"], "in-progress");
    assert_eq!(json["created_at"], "2024-03-09T20:15:00Z");
    let back: crate::domain::game::Game = serde_json::from_value(json).unwrap();
    assert_eq!(back, game);
}
