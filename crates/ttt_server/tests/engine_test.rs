//! Command engine scenarios against the in-memory store.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use ttt_core::{Cell, Mark, WinLine};
use ttt_server::{
    CommandError, FixedFirstMover, Game, GameEngine, GameState, GameStore, MembershipError,
    MembershipResolver, MemoryStore, MoveVerdict, PlayerRef, StoreError,
};

/// Resolves every name except "ghost" to a deterministic user id.
struct StubResolver;

#[async_trait]
impl MembershipResolver for StubResolver {
    async fn resolve_opponent(
        &self,
        name: &str,
        _channel_id: &str,
    ) -> Result<Option<String>, MembershipError> {
        if name == "ghost" {
            Ok(None)
        } else {
            Ok(Some(format!("U_{name}")))
        }
    }
}

fn engine_with(store: Arc<dyn GameStore>, challenger_first: bool) -> GameEngine {
    GameEngine::new(
        store,
        Arc::new(StubResolver),
        Arc::new(FixedFirstMover(challenger_first)),
        3,
    )
}

fn alice() -> PlayerRef {
    PlayerRef::new("U_alice".to_string(), "alice".to_string())
}

fn carol() -> PlayerRef {
    PlayerRef::new("U_carol".to_string(), "carol".to_string())
}

async fn started_game(engine: &GameEngine) -> Game {
    engine
        .start("T1", "C1", alice(), "bob")
        .await
        .expect("Start failed")
        .game()
        .clone()
}

#[tokio::test]
async fn start_creates_game_with_challenger_first() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone(), true);

    let game = started_game(&engine).await;
    assert_eq!(*game.state(), GameState::Started);
    assert_eq!(game.players()[0].name(), "alice");
    assert_eq!(game.players()[1].name(), "bob");
    assert_eq!(game.players()[1].id(), "U_bob");
    assert_eq!(game.current_player().name(), "alice");
    assert!(game.history().is_empty());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn start_can_give_the_opponent_the_first_move() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, false);

    let game = started_game(&engine).await;
    assert_eq!(game.players()[0].name(), "bob");
    assert_eq!(game.players()[1].name(), "alice");
    assert_eq!(game.current_player().name(), "bob");
    assert_eq!(game.start_player(), "alice");
}

#[tokio::test]
async fn start_rejects_unresolved_opponent() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone(), true);

    let result = engine.start("T1", "C1", alice(), "ghost").await;
    assert!(matches!(
        result,
        Err(CommandError::InvalidOpponent { name }) if name == "ghost"
    ));
    assert!(store.is_empty());
}

#[tokio::test]
async fn start_rejects_self_challenge() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);

    let result = engine.start("T1", "C1", alice(), "alice").await;
    assert!(matches!(result, Err(CommandError::SelfChallenge)));
}

#[tokio::test]
async fn second_start_in_channel_rejected_while_game_runs() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone(), true);

    started_game(&engine).await;
    let result = engine.start("T1", "C1", carol(), "bob").await;
    assert!(matches!(result, Err(CommandError::AlreadyPlaying)));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn start_allowed_in_other_channels() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone(), true);

    started_game(&engine).await;
    engine
        .start("T1", "C2", alice(), "bob")
        .await
        .expect("Start in second channel failed");
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn first_move_marks_cell_and_passes_turn() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    started_game(&engine).await;

    let outcome = engine.play("T1", "C1", "alice", 0).expect("Play failed");
    assert_eq!(*outcome.verdict(), MoveVerdict::Continue);
    assert_eq!(outcome.game().board().get(0), Some(Cell::Occupied(Mark::X)));
    assert_eq!(outcome.game().current_player().name(), "bob");
    assert_eq!(outcome.game().history().len(), 1);
}

#[tokio::test]
async fn filling_column_zero_wins_on_fifth_move() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone(), true);
    started_game(&engine).await;

    for (actor, cell) in [("alice", 0), ("bob", 1), ("alice", 3), ("bob", 4)] {
        let outcome = engine.play("T1", "C1", actor, cell).expect("Play failed");
        assert_eq!(*outcome.verdict(), MoveVerdict::Continue);
    }
    let outcome = engine.play("T1", "C1", "alice", 6).expect("Play failed");

    assert_eq!(*outcome.verdict(), MoveVerdict::Won(WinLine::Column(0)));
    assert_eq!(*outcome.game().state(), GameState::Win);
    assert_eq!(outcome.game().winner().as_deref(), Some("alice"));

    // The finished game is gone from every later lookup.
    assert!(matches!(
        engine.play("T1", "C1", "bob", 2),
        Err(CommandError::GameNotFound)
    ));
    assert!(matches!(
        engine.status("T1", "C1"),
        Err(CommandError::GameNotFound)
    ));
}

#[tokio::test]
async fn full_board_without_line_is_a_tie() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    started_game(&engine).await;

    // Ends as X O X / X O O / O X X with no completed line.
    let moves = [
        ("alice", 0),
        ("bob", 1),
        ("alice", 2),
        ("bob", 4),
        ("alice", 3),
        ("bob", 5),
        ("alice", 7),
        ("bob", 6),
    ];
    for (actor, cell) in moves {
        let outcome = engine.play("T1", "C1", actor, cell).expect("Play failed");
        assert_eq!(*outcome.verdict(), MoveVerdict::Continue);
    }
    let outcome = engine.play("T1", "C1", "alice", 8).expect("Play failed");
    assert_eq!(*outcome.verdict(), MoveVerdict::Tie);
    assert_eq!(*outcome.game().state(), GameState::Tie);
    assert!(outcome.game().winner().is_none());
}

#[tokio::test]
async fn out_of_turn_move_rejected_and_game_unchanged() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone(), true);
    started_game(&engine).await;

    let result = engine.play("T1", "C1", "bob", 0);
    assert!(matches!(
        result,
        Err(CommandError::NotYourTurn { ref expected }) if expected.name() == "alice"
    ));

    let reloaded = store
        .find_started("T1", "C1")
        .expect("Lookup failed")
        .expect("Game missing");
    assert!(reloaded.board().cells().iter().all(|c| *c == Cell::Empty));
    assert!(reloaded.history().is_empty());
    assert_eq!(reloaded.current_player().name(), "alice");
}

#[tokio::test]
async fn outsider_cannot_move() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    started_game(&engine).await;

    let result = engine.play("T1", "C1", "carol", 0);
    assert!(matches!(result, Err(CommandError::NotAPlayer { .. })));
}

#[tokio::test]
async fn occupied_and_out_of_range_moves_rejected() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    started_game(&engine).await;

    engine.play("T1", "C1", "alice", 4).expect("Play failed");
    assert!(matches!(
        engine.play("T1", "C1", "bob", 4),
        Err(CommandError::InvalidMove(_))
    ));
    assert!(matches!(
        engine.play("T1", "C1", "bob", 9),
        Err(CommandError::InvalidMove(_))
    ));
}

#[tokio::test]
async fn play_without_game_reports_not_found() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    assert!(matches!(
        engine.play("T1", "C1", "alice", 0),
        Err(CommandError::GameNotFound)
    ));
}

#[tokio::test]
async fn end_by_non_participant_rejected_and_game_survives() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    started_game(&engine).await;

    let result = engine.end("T1", "C1", "carol");
    assert!(matches!(result, Err(CommandError::NotAPlayer { .. })));

    let game = engine.status("T1", "C1").expect("Status failed");
    assert_eq!(*game.state(), GameState::Started);
}

#[tokio::test]
async fn end_by_player_retires_the_game() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    started_game(&engine).await;

    let game = engine.end("T1", "C1", "bob").expect("End failed");
    assert_eq!(*game.state(), GameState::NoResult);
    assert!(matches!(
        engine.status("T1", "C1"),
        Err(CommandError::GameNotFound)
    ));
    assert!(matches!(
        engine.history("T1", "C1"),
        Err(CommandError::GameNotFound)
    ));
}

#[tokio::test]
async fn status_and_history_are_read_only_views() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store, true);
    started_game(&engine).await;
    engine.play("T1", "C1", "alice", 0).expect("Play failed");

    let status = engine.status("T1", "C1").expect("Status failed");
    assert_eq!(status.current_player().name(), "bob");

    let history = engine.history("T1", "C1").expect("History failed");
    assert_eq!(history.history().len(), 1);
    assert_eq!(*history.history()[0].cell(), 0);
    assert_eq!(history.history()[0].player(), "alice");
}

/// Store whose insert lingers long enough for a second start to land in
/// the guard window.
#[derive(Clone)]
struct SlowInsertStore {
    inner: MemoryStore,
    delay: Duration,
}

impl GameStore for SlowInsertStore {
    fn find_started(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> Result<Option<Game>, StoreError> {
        self.inner.find_started(team_id, channel_id)
    }

    fn insert(&self, game: Game) -> Result<Game, StoreError> {
        std::thread::sleep(self.delay);
        self.inner.insert(game)
    }

    fn update(&self, game: &Game) -> Result<(), StoreError> {
        self.inner.update(game)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_starts_create_exactly_one_game() {
    let store = Arc::new(SlowInsertStore {
        inner: MemoryStore::new(),
        delay: Duration::from_millis(100),
    });
    let engine = Arc::new(engine_with(store.clone(), true));

    let first = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.start("T1", "C1", alice(), "bob").await })
    };
    let second = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.start("T1", "C1", carol(), "bob").await })
    };

    let results = [
        first.await.expect("Task panicked"),
        second.await.expect("Task panicked"),
    ];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one start must win");

    let loser = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("One start must lose");
    assert!(matches!(
        loser,
        CommandError::CreationInProgress | CommandError::AlreadyPlaying
    ));
    assert_eq!(store.inner.len(), 1);
}
