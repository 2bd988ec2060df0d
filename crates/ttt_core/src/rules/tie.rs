//! Tie detection.

use super::win::WinCheck;
use crate::board::Board;

/// True when the game is a tie: the board is full and the last move did not
/// win. Callers must evaluate the win check first; a full board that also
/// completes a line is a win, never a tie.
pub fn is_tie(board: &Board, check: &WinCheck) -> bool {
    matches!(check, WinCheck::NoWin) && board.is_full()
}
