//! Board rendering for Slack messages.

use ttt_core::{Board, Cell, WinLine};

/// Draws the board as a mrkdwn grid.
///
/// While the game runs, empty cells show their index in backticks so
/// players can see where they may move. Once won, empty cells collapse to
/// `_` and the winning line's marks are backticked instead.
pub fn draw(board: &Board, win: Option<&WinLine>) -> String {
    let size = board.size();
    let positions = win.map(|line| line.cells(size)).unwrap_or_default();
    let has_won = win.is_some();
    let mut pos = 0;
    let mut msg = String::new();

    for row in 0..size {
        msg.push('|');
        for col in 0..size {
            let index = size * row + col;
            let cell = match board.get(index) {
                Some(Cell::Occupied(mark)) => {
                    if has_won && pos < positions.len() && index == positions[pos] {
                        pos += 1;
                        format!(" `{mark}`")
                    } else {
                        format!(" {mark} ")
                    }
                }
                _ => {
                    if has_won {
                        " `_`".to_string()
                    } else {
                        format!(" `{index}`")
                    }
                }
            };
            msg.push_str(&format!(" {cell} |"));
        }
        msg.push('\n');
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttt_core::Mark;

    #[test]
    fn empty_board_shows_cell_indices() {
        let board = Board::standard();
        let drawn = draw(&board, None);
        let expected = "\
|  `0` |  `1` |  `2` |\n\
|  `3` |  `4` |  `5` |\n\
|  `6` |  `7` |  `8` |\n";
        assert_eq!(drawn, expected);
    }

    #[test]
    fn marks_render_without_backticks_midgame() {
        let mut board = Board::standard();
        board.place(0, Mark::X).expect("Place failed");
        board.place(4, Mark::O).expect("Place failed");
        let drawn = draw(&board, None);
        let expected = "\
|  X  |  `1` |  `2` |\n\
|  `3` |  O  |  `5` |\n\
|  `6` |  `7` |  `8` |\n";
        assert_eq!(drawn, expected);
    }

    #[test]
    fn winning_line_is_highlighted_and_empties_collapse() {
        let mut board = Board::standard();
        for (cell, mark) in [(0, Mark::X), (1, Mark::O), (3, Mark::X), (4, Mark::O), (6, Mark::X)]
        {
            board.place(cell, mark).expect("Place failed");
        }
        let drawn = draw(&board, Some(&WinLine::Column(0)));
        let expected = "\
|  `X` |  O  |  `_` |\n\
|  `X` |  O  |  `_` |\n\
|  `X` |  `_` |  `_` |\n";
        assert_eq!(drawn, expected);
    }
}
