//! Game persistence: the store contract and its implementations.

mod memory;
mod models;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::game::Game;
use derive_more::{Display, Error};

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

/// Persistence primitives for game records.
///
/// Every operation is a single-document read or write; the engine issues at
/// most one lookup and one write per command and never a multi-step
/// transaction. `find_started` only surfaces games in state `Started`,
/// which is what makes terminal games logically immutable.
pub trait GameStore: Send + Sync {
    /// Finds the channel's game in state `Started`, if any.
    fn find_started(
        &self,
        team_id: &str,
        channel_id: &str,
    ) -> Result<Option<Game>, StoreError>;

    /// Inserts a new game and returns it with the store id assigned.
    fn insert(&self, game: Game) -> Result<Game, StoreError>;

    /// Writes the record identified by the game's id.
    ///
    /// There is no version check: two writers racing on one record lose the
    /// earlier write, a documented limitation of the command model.
    fn update(&self, game: &Game) -> Result<(), StoreError>;
}
