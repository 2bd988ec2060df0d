//! In-memory store for tests and local development.

use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

use crate::game::{Game, GameState};
use crate::store::{GameStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    games: Vec<Game>,
}

/// `Mutex<Vec>`-backed store with the same observable contract as the
/// database-backed one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records ever inserted, terminal games included.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().games.len()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameStore for MemoryStore {
    #[instrument(skip(self))]
    fn find_started(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> Result<Option<Game>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let game = inner
            .games
            .iter()
            .find(|g| {
                *g.state() == GameState::Started
                    && g.team_id() == team_id
                    && g.channel_id() == channel_id
            })
            .cloned();
        debug!(found = game.is_some(), "Lookup complete");
        Ok(game)
    }

    #[instrument(skip(self, game), fields(team_id = %game.team_id(), channel_id = %game.channel_id()))]
    fn insert(&self, game: Game) -> Result<Game, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let game = game.with_id(inner.next_id);
        inner.games.push(game.clone());
        debug!(game_id = inner.next_id, "Game inserted");
        Ok(game)
    }

    #[instrument(skip(self, game), fields(game_id = ?game.id()))]
    fn update(&self, game: &Game) -> Result<(), StoreError> {
        let Some(id) = *game.id() else {
            return Err(StoreError::new("Cannot update a game without an id"));
        };
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .games
            .iter_mut()
            .find(|g| g.id() == &Some(id))
            .ok_or_else(|| StoreError::new(format!("No game with id {}", id)))?;
        *slot = game.clone();
        debug!(game_id = id, "Game updated");
        Ok(())
    }
}
