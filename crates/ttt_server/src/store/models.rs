//! Database row models and their domain conversions.
//!
//! The game document becomes one row: scalar fields map to columns directly,
//! while the board, player pair and move history are stored as JSON text.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use std::str::FromStr;
use ttt_core::Board;

use crate::game::{Game, GameState, HistoryEntry, PlayerRef};
use crate::store::{schema, StoreError};

/// Queryable game row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = schema::games)]
pub struct GameRow {
    pub id: i32,
    pub team_id: String,
    pub channel_id: String,
    pub start_player: String,
    pub players: String,
    pub current_player: String,
    pub winner: Option<String>,
    pub board: String,
    pub state: String,
    pub history: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable game row for new records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::games)]
pub struct NewGameRow {
    pub team_id: String,
    pub channel_id: String,
    pub start_player: String,
    pub players: String,
    pub current_player: String,
    pub winner: Option<String>,
    pub board: String,
    pub state: String,
    pub history: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

impl GameRow {
    /// Converts the row into the domain record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a JSON column or the state string does
    /// not parse, or the stored current player is not one of the players.
    pub fn into_game(self) -> Result<Game, StoreError> {
        let players: [PlayerRef; 2] = serde_json::from_str(&self.players)
            .map_err(|e| StoreError::new(format!("Invalid players column: {}", e)))?;
        let board: Board = serde_json::from_str(&self.board)
            .map_err(|e| StoreError::new(format!("Invalid board column: {}", e)))?;
        let history: Vec<HistoryEntry> = serde_json::from_str(&self.history)
            .map_err(|e| StoreError::new(format!("Invalid history column: {}", e)))?;
        let state = GameState::from_str(&self.state)
            .map_err(|_| StoreError::new(format!("Invalid state column: '{}'", self.state)))?;

        Game::from_stored(
            self.id,
            self.team_id,
            self.channel_id,
            self.start_player,
            players,
            &self.current_player,
            self.winner,
            board,
            state,
            history,
            to_utc(self.created_at),
            to_utc(self.updated_at),
        )
        .map_err(|e| StoreError::new(e.to_string()))
    }
}

impl NewGameRow {
    /// Builds an insertable row from the domain record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a JSON column fails to serialize.
    pub fn from_game(game: &Game) -> Result<Self, StoreError> {
        Ok(Self {
            team_id: game.team_id().clone(),
            channel_id: game.channel_id().clone(),
            start_player: game.start_player().clone(),
            players: serde_json::to_string(game.players())
                .map_err(|e| StoreError::new(format!("Players serialization: {}", e)))?,
            current_player: game.current_player().name().clone(),
            winner: game.winner().clone(),
            board: serde_json::to_string(game.board())
                .map_err(|e| StoreError::new(format!("Board serialization: {}", e)))?,
            state: game.state().to_string(),
            history: serde_json::to_string(game.history())
                .map_err(|e| StoreError::new(format!("History serialization: {}", e)))?,
            created_at: game.created_at().naive_utc(),
            updated_at: game.updated_at().naive_utc(),
        })
    }
}
