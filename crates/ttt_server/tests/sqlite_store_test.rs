//! SQLite store round-trips.

use tempfile::NamedTempFile;
use ttt_core::{Cell, Mark};
use ttt_server::{Game, GameState, GameStore, MoveVerdict, PlayerRef, SqliteStore};

/// Creates a temporary database file and a store with migrations applied.
/// The file handle must stay in scope to keep the database alive.
fn setup_test_db() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::new(db_path).expect("Failed to create store");
    (db_file, store)
}

fn sample_game() -> Game {
    Game::new(
        "T1".to_string(),
        "C1".to_string(),
        "alice".to_string(),
        PlayerRef::new("U1".to_string(), "alice".to_string()),
        PlayerRef::new("U2".to_string(), "bob".to_string()),
        3,
    )
}

#[test]
fn insert_assigns_an_id() {
    let (_db, store) = setup_test_db();
    let game = store.insert(sample_game()).expect("Insert failed");
    assert!(game.id().is_some());
}

#[test]
fn find_started_round_trips_the_record() {
    let (_db, store) = setup_test_db();
    store.insert(sample_game()).expect("Insert failed");

    let found = store
        .find_started("T1", "C1")
        .expect("Lookup failed")
        .expect("Game missing");
    assert_eq!(*found.state(), GameState::Started);
    assert_eq!(found.team_id(), "T1");
    assert_eq!(found.channel_id(), "C1");
    assert_eq!(found.start_player(), "alice");
    assert_eq!(found.players()[0].name(), "alice");
    assert_eq!(found.players()[1].id(), "U2");
    assert_eq!(found.current_player().name(), "alice");
    assert!(found.winner().is_none());
    assert!(found.history().is_empty());
    assert_eq!(found.board().len(), 9);
}

#[test]
fn find_started_misses_other_channels() {
    let (_db, store) = setup_test_db();
    store.insert(sample_game()).expect("Insert failed");

    assert!(store
        .find_started("T1", "C2")
        .expect("Lookup failed")
        .is_none());
    assert!(store
        .find_started("T2", "C1")
        .expect("Lookup failed")
        .is_none());
}

#[test]
fn update_persists_moves_and_history() {
    let (_db, store) = setup_test_db();
    let mut game = store.insert(sample_game()).expect("Insert failed");

    assert_eq!(game.play_cell(4), Ok(MoveVerdict::Continue));
    store.update(&game).expect("Update failed");

    let found = store
        .find_started("T1", "C1")
        .expect("Lookup failed")
        .expect("Game missing");
    assert_eq!(found.board().get(4), Some(Cell::Occupied(Mark::X)));
    assert_eq!(found.history().len(), 1);
    assert_eq!(found.history()[0].player(), "alice");
    assert_eq!(*found.history()[0].cell(), 4);
    assert_eq!(found.current_player().name(), "bob");
}

#[test]
fn terminal_games_drop_out_of_lookups() {
    let (_db, store) = setup_test_db();
    let mut game = store.insert(sample_game()).expect("Insert failed");

    game.finish_no_result();
    store.update(&game).expect("Update failed");

    assert!(store
        .find_started("T1", "C1")
        .expect("Lookup failed")
        .is_none());
}

#[test]
fn won_game_round_trips_winner() {
    let (_db, store) = setup_test_db();
    let mut game = store.insert(sample_game()).expect("Insert failed");

    // X takes column 0.
    for cell in [0, 1, 3, 4] {
        game.play_cell(cell).expect("Move failed");
    }
    assert!(matches!(
        game.play_cell(6).expect("Move failed"),
        MoveVerdict::Won(_)
    ));
    store.update(&game).expect("Update failed");

    // The finished game no longer surfaces; a fresh game can be inserted.
    assert!(store
        .find_started("T1", "C1")
        .expect("Lookup failed")
        .is_none());
    store.insert(sample_game()).expect("Second insert failed");
    let found = store
        .find_started("T1", "C1")
        .expect("Lookup failed")
        .expect("Game missing");
    assert!(found.history().is_empty());
}

#[test]
fn update_without_id_fails() {
    let (_db, store) = setup_test_db();
    let game = sample_game();
    assert!(store.update(&game).is_err());
}
