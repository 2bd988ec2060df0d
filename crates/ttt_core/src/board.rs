//! Board model: cells, marks, and coordinate math.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Board side length used when no custom size is requested.
pub const DEFAULT_SIZE: usize = 3;

/// A player's symbol on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// Mark of the player at index 0, who moves first.
    X,
    /// Mark of the player at index 1.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// State of a single board cell.
///
/// Serializes as the wire numbers `0` (empty), `1` (X) and `2` (O), the
/// representation the stored board array uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cell {
    /// No mark placed yet.
    Empty,
    /// Cell holding a player's mark.
    Occupied(Mark),
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Empty => 0,
            Cell::Occupied(Mark::X) => 1,
            Cell::Occupied(Mark::O) => 2,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Occupied(Mark::X)),
            2 => Ok(Cell::Occupied(Mark::O)),
            _ => Err(BoardError::InvalidCell { value }),
        }
    }
}

/// Error constructing a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The cell array length has no integer square root.
    #[display("board length {len} is not a perfect square")]
    NotSquare {
        /// Offending cell count.
        len: usize,
    },
    /// A stored cell value outside the 0..=2 range.
    #[display("invalid cell value {value}")]
    InvalidCell {
        /// Offending wire value.
        value: u8,
    },
}

/// Error placing a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The index does not address a cell.
    #[display("cell index {index} is outside the board (0..{len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        len: usize,
    },
    /// The cell already holds a mark.
    #[display("cell {index} is already occupied")]
    CellOccupied {
        /// Requested index.
        index: usize,
    },
}

/// A square tic-tac-toe board stored as a flat, row-major cell array.
///
/// Index `i` lives at row `i / size`, column `i % size`. The size is fixed
/// at construction; the cell count is always `size * size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Creates the classic empty 3x3 board.
    pub fn standard() -> Self {
        Self::new(DEFAULT_SIZE)
    }

    /// Builds a board from an existing cell array.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotSquare`] when the array length has no
    /// integer square root.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, BoardError> {
        let size = (cells.len() as f64).sqrt() as usize;
        if size * size != cells.len() {
            return Err(BoardError::NotSquare { len: cells.len() });
        }
        Ok(Self { size, cells })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on the board.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the board has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at the given index, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Row of the given cell index.
    pub fn row_of(&self, index: usize) -> usize {
        index / self.size
    }

    /// Column of the given cell index.
    pub fn col_of(&self, index: usize) -> usize {
        index % self.size
    }

    /// Places a mark at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::OutOfRange`] when the index does not address a
    /// cell and [`PlaceError::CellOccupied`] when the cell is already taken.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), PlaceError> {
        match self.get(index) {
            None => Err(PlaceError::OutOfRange {
                index,
                len: self.cells.len(),
            }),
            Some(Cell::Occupied(_)) => Err(PlaceError::CellOccupied { index }),
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Occupied(mark);
                Ok(())
            }
        }
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = BoardError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Vec<Cell> {
        board.cells
    }
}
