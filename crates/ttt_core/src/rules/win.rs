//! Win detection logic.

use crate::board::{Board, Cell};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A completed winning line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinLine {
    /// All cells in the given row match.
    Row(usize),
    /// All cells in the given column match.
    Column(usize),
    /// A full diagonal: `1` for the forward diagonal (top-left to
    /// bottom-right), `-1` for the backward diagonal.
    Diagonal(i8),
}

impl WinLine {
    /// Board indices making up this line on a board of the given size.
    pub fn cells(&self, size: usize) -> Vec<usize> {
        match *self {
            WinLine::Row(row) => (0..size).map(|col| size * row + col).collect(),
            WinLine::Column(col) => (0..size).map(|row| size * row + col).collect(),
            WinLine::Diagonal(1) => (0..size).map(|i| size * i + i).collect(),
            WinLine::Diagonal(_) => (0..size).map(|i| size * i + (size - i - 1)).collect(),
        }
    }
}

/// Outcome of checking the board after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCheck {
    /// The move did not complete a line.
    NoWin,
    /// The move completed the given line.
    Won(WinLine),
}

impl WinCheck {
    /// The winning line, when there is one.
    pub fn line(&self) -> Option<&WinLine> {
        match self {
            WinCheck::NoWin => None,
            WinCheck::Won(line) => Some(line),
        }
    }
}

/// Checks whether the last move completed a line.
///
/// Only the lines passing through `last_move` are inspected: its row, its
/// column, the forward diagonal when the move sits on it, and the backward
/// diagonal likewise. A move can only create a new winning line through
/// itself, so this covers every possible win at O(size) per line. When
/// several lines complete at once the first found is reported, in the order
/// row, column, forward diagonal, backward diagonal.
#[instrument(skip(board), fields(size = board.size()))]
pub fn evaluate(board: &Board, last_move: usize) -> WinCheck {
    let size = board.size();
    let mark = match board.get(last_move) {
        Some(Cell::Occupied(mark)) => mark,
        _ => return WinCheck::NoWin,
    };
    let row = board.row_of(last_move);
    let col = board.col_of(last_move);

    let wins = |line: &WinLine| {
        line.cells(size)
            .into_iter()
            .all(|i| board.get(i) == Some(Cell::Occupied(mark)))
    };

    let mut candidates = vec![WinLine::Row(row), WinLine::Column(col)];
    if row == col {
        candidates.push(WinLine::Diagonal(1));
    }
    if row + col == size - 1 {
        candidates.push(WinLine::Diagonal(-1));
    }

    for line in candidates {
        if wins(&line) {
            return WinCheck::Won(line);
        }
    }

    WinCheck::NoWin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    fn board_with(moves: &[(usize, Mark)]) -> Board {
        let mut board = Board::standard();
        for (index, mark) in moves {
            board.place(*index, *mark).expect("Place failed");
        }
        board
    }

    #[test]
    fn empty_board_has_no_win() {
        let board = Board::standard();
        for i in 0..9 {
            assert_eq!(evaluate(&board, i), WinCheck::NoWin);
        }
    }

    #[test]
    fn every_row_wins_with_matching_descriptor() {
        for row in 0..3 {
            let cells: Vec<(usize, Mark)> =
                (0..3).map(|col| (3 * row + col, Mark::X)).collect();
            let board = board_with(&cells);
            for (index, _) in &cells {
                assert_eq!(
                    evaluate(&board, *index),
                    WinCheck::Won(WinLine::Row(row)),
                    "row {row} via move {index}"
                );
            }
        }
    }

    #[test]
    fn every_column_wins_with_matching_descriptor() {
        for col in 0..3 {
            let cells: Vec<(usize, Mark)> =
                (0..3).map(|row| (3 * row + col, Mark::O)).collect();
            let board = board_with(&cells);
            for (index, _) in &cells {
                assert_eq!(
                    evaluate(&board, *index),
                    WinCheck::Won(WinLine::Column(col)),
                    "column {col} via move {index}"
                );
            }
        }
    }

    #[test]
    fn forward_diagonal_wins() {
        let board = board_with(&[(0, Mark::X), (4, Mark::X), (8, Mark::X)]);
        assert_eq!(evaluate(&board, 8), WinCheck::Won(WinLine::Diagonal(1)));
    }

    #[test]
    fn backward_diagonal_wins() {
        let board = board_with(&[(2, Mark::O), (4, Mark::O), (6, Mark::O)]);
        assert_eq!(evaluate(&board, 6), WinCheck::Won(WinLine::Diagonal(-1)));
    }

    #[test]
    fn partial_line_does_not_win() {
        let board = board_with(&[(0, Mark::X), (1, Mark::X)]);
        assert_eq!(evaluate(&board, 1), WinCheck::NoWin);
    }

    #[test]
    fn mixed_marks_do_not_win() {
        let board = board_with(&[(0, Mark::X), (1, Mark::O), (2, Mark::X)]);
        assert_eq!(evaluate(&board, 2), WinCheck::NoWin);
    }

    #[test]
    fn no_win_for_any_move_without_a_full_line() {
        // X O X / X O O / O X X: full board, no completed line.
        let board = board_with(&[
            (0, Mark::X),
            (1, Mark::O),
            (2, Mark::X),
            (3, Mark::X),
            (4, Mark::O),
            (5, Mark::O),
            (6, Mark::O),
            (7, Mark::X),
            (8, Mark::X),
        ]);
        for i in 0..9 {
            assert_eq!(evaluate(&board, i), WinCheck::NoWin, "move {i}");
        }
    }

    #[test]
    fn row_reported_before_column_when_both_complete() {
        // Degenerate double win through index 0: row 0 and column 0 both
        // complete. Row takes precedence.
        let board = board_with(&[
            (0, Mark::X),
            (1, Mark::X),
            (2, Mark::X),
            (3, Mark::X),
            (6, Mark::X),
        ]);
        assert_eq!(evaluate(&board, 0), WinCheck::Won(WinLine::Row(0)));
    }

    #[test]
    fn win_line_cells_enumerate_the_line() {
        assert_eq!(WinLine::Row(1).cells(3), vec![3, 4, 5]);
        assert_eq!(WinLine::Column(2).cells(3), vec![2, 5, 8]);
        assert_eq!(WinLine::Diagonal(1).cells(3), vec![0, 4, 8]);
        assert_eq!(WinLine::Diagonal(-1).cells(3), vec![2, 4, 6]);
    }
}
