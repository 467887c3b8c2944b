//! Tests for game sessions, persistence and shared access.

use std::sync::Arc;
use std::thread;
use strictly_grid::{ErrorCategory, GameStatus, GridErrorKind, Mark, Point};
use strictly_lines::{
    GameConfig, GameSession, PlayerKind, PlayerSpec, SessionError, SessionErrorKind, SessionRecord,
    SharedSession,
};

fn human_session() -> GameSession {
    let config = GameConfig::default().with_seed(3);
    GameSession::new(&config, PlayerKind::Human, PlayerKind::Human).unwrap()
}

/// X takes the top row while O plays the middle row.
fn play_x_win(session: &mut GameSession) -> GameStatus {
    let moves = [("a", 1), ("a", 2), ("b", 1), ("b", 2), ("c", 1)];
    let mut status = GameStatus::InProgress;
    for (x, y) in moves {
        status = session.play(Point::new(x, y)).unwrap();
    }
    status
}

#[test]
fn test_win_ends_session() {
    let mut session = human_session();
    let status = play_x_win(&mut session);
    let GameStatus::Won(line) = status else {
        panic!("expected a win");
    };
    assert_eq!(line.mark, Mark::X);
    assert_eq!(line.to_string(), "Player X is won: [a:1, b:1, c:1]");

    let err = session.play(Point::new("c", 3)).unwrap_err();
    assert!(matches!(err.kind, SessionErrorKind::GameOver(_)));
    assert_eq!(session.suggest().unwrap(), None);
}

#[test]
fn test_save_and_load_restore_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut session = human_session();
    session.play(Point::new("b", 2)).unwrap();
    session.play(Point::new("a", 1)).unwrap();
    session.save(&path).unwrap();

    let restored = GameSession::load(&path).unwrap();
    assert_eq!(restored.to_move(), Mark::X);
    assert_eq!(restored.history(), session.history());
    assert_eq!(restored.board().occupied(), 2);
    assert_eq!(restored.record(), session.record());
    assert_eq!(restored.status(), &GameStatus::InProgress);
}

#[test]
fn test_loaded_finished_game_stays_finished() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("won.json");

    let mut session = human_session();
    play_x_win(&mut session);
    session.save(&path).unwrap();

    let restored = GameSession::load(&path).unwrap();
    assert!(matches!(restored.status(), GameStatus::Won(line) if line.mark == Mark::X));
}

#[test]
fn test_load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameSession::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err.kind, SessionErrorKind::Storage(_)));
}

#[test]
fn test_engines_finish_on_default_board() {
    for seed in 0..5 {
        let config = GameConfig::default().with_seed(seed);
        let mut session = GameSession::new(&config, PlayerKind::Engine, PlayerKind::Engine).unwrap();
        let mut moves = 0;
        while session.engine_step().unwrap().is_some() {
            moves += 1;
            assert!(moves <= 9);
        }
        assert!(session.status().is_terminal());
        assert_eq!(session.history().len(), moves);
    }
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let config = GameConfig::default().with_seed(99);
    let mut first = GameSession::new(&config, PlayerKind::Engine, PlayerKind::Engine).unwrap();
    let mut second = GameSession::new(&config, PlayerKind::Engine, PlayerKind::Engine).unwrap();
    while first.engine_step().unwrap().is_some() {}
    while second.engine_step().unwrap().is_some() {}
    assert_eq!(first.history(), second.history());
}

#[test]
fn test_shared_session_serializes_turns() {
    let config = GameConfig::default().with_seed(5);
    let shared = SharedSession::new(
        GameSession::new(&config, PlayerKind::Engine, PlayerKind::Engine).unwrap(),
    );
    let shared = Arc::new(shared);

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..9 {
                    shared.with_turn(|session| session.engine_step()).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    shared
        .with_turn(|session| {
            assert!(session.status().is_terminal());
            let occupied = session.board().occupied();
            assert_eq!(occupied, session.history().len());
            let x = session.board().items().into_iter().filter(|item| item.kind().mark() == Some(Mark::X)).count();
            assert!(x == occupied - x || x == occupied - x + 1);
            Ok(())
        })
        .unwrap();
}

fn assert_malformed(err: SessionError) {
    let SessionErrorKind::Grid(grid) = &err.kind else {
        panic!("expected a grid error, got {err}");
    };
    assert!(matches!(grid.kind, GridErrorKind::MalformedRecord(_)), "{grid}");
    assert_eq!(grid.category(), ErrorCategory::Configuration);
}

fn record_after_one_move() -> SessionRecord {
    let mut session = human_session();
    session.play(Point::new("b", 2)).unwrap();
    session.record()
}

#[test]
fn test_load_rejects_swapped_player_marks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swapped.json");

    let mut record = record_after_one_move();
    record.players = [
        PlayerSpec::new(Mark::O, PlayerKind::Human, 3, 3),
        PlayerSpec::new(Mark::X, PlayerKind::Human, 3, 4),
    ];
    std::fs::write(&path, serde_json::to_string(&record).unwrap()).unwrap();

    assert_malformed(GameSession::load(&path).unwrap_err());
}

#[test]
fn test_record_rejects_wrong_mark_to_move() {
    let mut record = record_after_one_move();
    assert_eq!(record.to_move, Mark::O);
    record.to_move = Mark::X;
    assert_malformed(GameSession::from_record(record).unwrap_err());
}

#[test]
fn test_record_rejects_history_mismatch() {
    let mut record = record_after_one_move();
    record.history.clear();
    assert_malformed(GameSession::from_record(record).unwrap_err());
}

#[test]
fn test_record_rejects_mixed_win_lengths() {
    let mut record = record_after_one_move();
    record.players[1] = PlayerSpec::new(Mark::O, PlayerKind::Engine, 2, 4);
    assert_malformed(GameSession::from_record(record).unwrap_err());
}

#[test]
fn test_valid_record_round_trips() {
    let record = record_after_one_move();
    let session = GameSession::from_record(record.clone()).unwrap();
    assert_eq!(session.to_move(), Mark::O);
    assert_eq!(session.record(), record);
}
