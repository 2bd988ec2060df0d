//! SQLite-backed game store.

use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info, instrument};

use crate::game::Game;
use crate::store::models::{GameRow, NewGameRow};
use crate::store::{schema, GameStore, StoreError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Game store backed by a SQLite database.
///
/// Opens a connection per call; every store operation is a single statement.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Creates a store for the database at the given path, applying any
    /// pending migrations. Use `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the database cannot be opened or a
    /// migration fails.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening game store");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migration failure: {}", e)))?;
        Ok(store)
    }

    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })
    }
}

impl GameStore for SqliteStore {
    #[instrument(skip(self))]
    fn find_started(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> Result<Option<Game>, StoreError> {
        let mut conn = self.connection()?;

        let row = schema::games::table
            .filter(schema::games::team_id.eq(team_id))
            .filter(schema::games::channel_id.eq(channel_id))
            .filter(schema::games::state.eq(crate::game::GameState::Started.to_string()))
            .first::<GameRow>(&mut conn)
            .optional()?;

        debug!(found = row.is_some(), "Lookup complete");
        row.map(GameRow::into_game).transpose()
    }

    #[instrument(skip(self, game), fields(team_id = %game.team_id(), channel_id = %game.channel_id()))]
    fn insert(&self, game: Game) -> Result<Game, StoreError> {
        let mut conn = self.connection()?;

        let new_row = NewGameRow::from_game(&game)?;
        let row = diesel::insert_into(schema::games::table)
            .values(&new_row)
            .returning(GameRow::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = row.id, "Game inserted");
        Ok(game.with_id(row.id))
    }

    #[instrument(skip(self, game), fields(game_id = ?game.id()))]
    fn update(&self, game: &Game) -> Result<(), StoreError> {
        let Some(id) = *game.id() else {
            return Err(StoreError::new("Cannot update a game without an id"));
        };
        let mut conn = self.connection()?;

        let row = NewGameRow::from_game(game)?;
        let updated = diesel::update(schema::games::table.find(id))
            .set((
                schema::games::current_player.eq(row.current_player),
                schema::games::winner.eq(row.winner),
                schema::games::board.eq(row.board),
                schema::games::state.eq(row.state),
                schema::games::history.eq(row.history),
                schema::games::updated_at.eq(row.updated_at),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(StoreError::new(format!("No game with id {}", id)));
        }
        info!(game_id = id, state = %game.state(), "Game updated");
        Ok(())
    }
}
