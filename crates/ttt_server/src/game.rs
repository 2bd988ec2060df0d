//! The persisted game record and its lifecycle.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use ttt_core::{rules, Board, PlaceError, WinCheck, WinLine};

/// Lifecycle state of a game record.
///
/// `Started` is the only state commands operate on; `Win`, `Tie` and
/// `NoResult` are terminal. Lookups filter on `Started`, so a terminal game
/// is invisible to every later command.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum GameState {
    /// Moves can be made.
    Started,
    /// Ended with a winner.
    Win,
    /// Ended with a full board and no winner.
    Tie,
    /// Ended early without a result.
    NoResult,
}

/// One of the two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct PlayerRef {
    /// Slack user id.
    id: String,
    /// Slack user name, unique within the team.
    name: String,
}

/// A single recorded ply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HistoryEntry {
    /// Name of the player who moved.
    player: String,
    /// Board cell the mark was placed on.
    cell: usize,
    /// When the move was made.
    played_at: DateTime<Utc>,
}

/// Typed reference to whose turn it is: an index into the player pair.
///
/// The player in slot `First` opened the game and plays X; `Second` plays O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    /// Index 0, mark X, moves first.
    First,
    /// Index 1, mark O.
    Second,
}

impl PlayerSlot {
    /// The other slot.
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::First => PlayerSlot::Second,
            PlayerSlot::Second => PlayerSlot::First,
        }
    }

    /// Index into the player pair.
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::First => 0,
            PlayerSlot::Second => 1,
        }
    }

    /// The mark this slot plays.
    pub fn mark(self) -> ttt_core::Mark {
        match self {
            PlayerSlot::First => ttt_core::Mark::X,
            PlayerSlot::Second => ttt_core::Mark::O,
        }
    }
}

/// Classified result of a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveVerdict {
    /// The move completed the given line; the mover won.
    Won(WinLine),
    /// The board filled with no winner.
    Tie,
    /// The game continues with the other player.
    Continue,
}

/// A stored record violated the game's invariants on load.
#[derive(Debug, Clone, Display, Error)]
#[display("current player '{name}' is not one of the game's players")]
pub struct GameIntegrityError {
    /// The offending current-player name.
    pub name: String,
}

/// The unit of persistence: one game per (team, channel) in state `Started`.
///
/// Created by `start`, mutated only by `play` and `end`, immutable once
/// terminal. The player pair is fixed at creation; the player at index 0
/// moves first with X.
#[derive(Debug, Clone, Getters)]
pub struct Game {
    /// Store-assigned id; `None` until inserted.
    id: Option<i32>,
    /// Slack team id.
    team_id: String,
    /// Slack channel id.
    channel_id: String,
    /// Name of the user who issued the start command.
    start_player: String,
    /// The two participants; index 0 moves first with X.
    players: [PlayerRef; 2],
    /// Whose turn it is.
    #[getter(skip)]
    turn: PlayerSlot,
    /// Winner's name, set only when `state` is `Win`.
    winner: Option<String>,
    /// The board.
    board: Board,
    /// Lifecycle state.
    state: GameState,
    /// Every ply made, in order.
    history: Vec<HistoryEntry>,
    /// Creation time.
    created_at: DateTime<Utc>,
    /// Last persisted mutation time.
    updated_at: DateTime<Utc>,
}

impl Game {
    /// Creates a fresh game: empty board, empty history, `Started`, the
    /// player in slot `First` to move.
    pub fn new(
        team_id: String,
        channel_id: String,
        start_player: String,
        first: PlayerRef,
        second: PlayerRef,
        board_size: usize,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            team_id,
            channel_id,
            start_player,
            players: [first, second],
            turn: PlayerSlot::First,
            winner: None,
            board: Board::new(board_size),
            state: GameState::Started,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a game from stored fields, validating that the stored
    /// current player is one of the two participants.
    ///
    /// # Errors
    ///
    /// Returns [`GameIntegrityError`] when the current-player name matches
    /// neither player.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        id: i32,
        team_id: String,
        channel_id: String,
        start_player: String,
        players: [PlayerRef; 2],
        current_player: &str,
        winner: Option<String>,
        board: Board,
        state: GameState,
        history: Vec<HistoryEntry>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, GameIntegrityError> {
        let turn = if players[0].name() == current_player {
            PlayerSlot::First
        } else if players[1].name() == current_player {
            PlayerSlot::Second
        } else {
            return Err(GameIntegrityError {
                name: current_player.to_string(),
            });
        };
        Ok(Self {
            id: Some(id),
            team_id,
            channel_id,
            start_player,
            players,
            turn,
            winner,
            board,
            state,
            history,
            created_at,
            updated_at,
        })
    }

    /// Whose turn it is.
    pub fn turn(&self) -> PlayerSlot {
        self.turn
    }

    /// The player whose move is next.
    pub fn current_player(&self) -> &PlayerRef {
        &self.players[self.turn.index()]
    }

    /// The player in the given slot.
    pub fn player(&self, slot: PlayerSlot) -> &PlayerRef {
        &self.players[slot.index()]
    }

    /// Finds the slot of the participant with the given name.
    pub fn slot_of(&self, name: &str) -> Option<PlayerSlot> {
        if self.players[0].name() == name {
            Some(PlayerSlot::First)
        } else if self.players[1].name() == name {
            Some(PlayerSlot::Second)
        } else {
            None
        }
    }

    /// Assigns the store id after insertion.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Plays the current player's mark at the given cell: fills the board,
    /// appends the history entry, and applies the win/tie/turn-advance
    /// transition. On a win the current player is left unchanged and
    /// recorded as the winner; on a tie the state flips to `Tie`; otherwise
    /// the turn passes to the other player.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError`] when the cell is out of range or occupied; the
    /// record is unchanged in that case.
    pub fn play_cell(&mut self, cell: usize) -> Result<MoveVerdict, PlaceError> {
        let slot = self.turn;
        let mover = self.players[slot.index()].name().clone();
        self.board.place(cell, slot.mark())?;
        self.history
            .push(HistoryEntry::new(mover.clone(), cell, Utc::now()));

        let check = rules::evaluate(&self.board, cell);
        let verdict = if let WinCheck::Won(line) = check {
            self.state = GameState::Win;
            self.winner = Some(mover);
            MoveVerdict::Won(line)
        } else if rules::is_tie(&self.board, &check) {
            self.state = GameState::Tie;
            MoveVerdict::Tie
        } else {
            self.turn = slot.other();
            MoveVerdict::Continue
        };
        self.updated_at = Utc::now();
        Ok(verdict)
    }

    /// Ends the game without a result.
    pub fn finish_no_result(&mut self) {
        self.state = GameState::NoResult;
        self.updated_at = Utc::now();
    }
}
