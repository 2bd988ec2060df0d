//! Pure tic-tac-toe game logic.
//!
//! This crate holds the board model and the win/tie rules, free of any
//! persistence or transport concerns. The server crate layers command
//! handling and storage on top of these types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
pub mod rules;

pub use board::{Board, BoardError, Cell, Mark, PlaceError, DEFAULT_SIZE};
pub use rules::{evaluate, is_tie, WinCheck, WinLine};
