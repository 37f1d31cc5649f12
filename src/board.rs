use std::fmt;

use crate::error::EngineError;
use crate::types::{BOARD_SIZE, CellState, NUM_SQUARES, Position, Side};

/// 8x8 grid of cell states stored row-major.
///
/// The board is a plain value: copying it yields a fully independent grid,
/// which is how the CPU search simulates moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [CellState; NUM_SQUARES],
}

impl Board {
    /// Creates the opening position:
    /// black at (3,3) and (4,4), white at (3,4) and (4,3).
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.cells[idx(3, 3)] = CellState::Black;
        board.cells[idx(4, 4)] = CellState::Black;
        board.cells[idx(3, 4)] = CellState::White;
        board.cells[idx(4, 3)] = CellState::White;
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [CellState::Empty; NUM_SQUARES],
        }
    }

    /// Parses eight rows of eight characters.
    /// `.` or `-` is empty, `B`/`X` is black, `W`/`O` is white.
    pub fn from_rows(rows: &[&str]) -> Result<Self, EngineError> {
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::InvalidBoardText(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE {
                return Err(EngineError::InvalidBoardText(format!(
                    "row {row} has {} cells",
                    symbols.len()
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                board.cells[idx(row, col)] = match symbol {
                    '.' | '-' => CellState::Empty,
                    'B' | 'X' => CellState::Black,
                    'W' | 'O' => CellState::White,
                    other => {
                        return Err(EngineError::InvalidBoardText(format!(
                            "unexpected symbol {other:?} at ({row}, {col})"
                        )));
                    }
                };
            }
        }

        Ok(board)
    }

    pub fn get(&self, pos: Position) -> Result<CellState, EngineError> {
        check_bounds(pos)?;
        Ok(self.cells[pos.index()])
    }

    pub fn set(&mut self, pos: Position, state: CellState) -> Result<(), EngineError> {
        check_bounds(pos)?;
        self.cells[pos.index()] = state;
        Ok(())
    }

    /// Unchecked read for positions already known to be on the board.
    pub(crate) fn at(&self, pos: Position) -> CellState {
        self.cells[pos.index()]
    }

    pub(crate) fn put(&mut self, pos: Position, state: CellState) {
        self.cells[pos.index()] = state;
    }

    pub fn cells(&self) -> &[CellState; NUM_SQUARES] {
        &self.cells
    }

    /// Returns `(black_count, white_count)`.
    pub fn disc_counts(&self) -> (u8, u8) {
        self.cells
            .iter()
            .fold((0u8, 0u8), |(black, white), cell| match cell {
                CellState::Black => (black + 1, white),
                CellState::White => (black, white + 1),
                CellState::Empty => (black, white),
            })
    }

    pub fn count_of(&self, side: Side) -> u8 {
        let (black, white) = self.disc_counts();
        match side {
            Side::Black => black,
            Side::White => white,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black, white) = self.disc_counts();
        NUM_SQUARES as u8 - black - white
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (slot, cell) in out.iter_mut().zip(self.cells.iter()) {
            *slot = cell.as_u8();
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let symbol = match self.cells[idx(row, col)] {
                    CellState::Empty => '.',
                    CellState::Black => 'B',
                    CellState::White => 'W',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn idx(row: usize, col: usize) -> usize {
    row * BOARD_SIZE + col
}

fn check_bounds(pos: Position) -> Result<(), EngineError> {
    if pos.is_on_board() {
        Ok(())
    } else {
        Err(EngineError::OutOfBounds {
            row: pos.row,
            col: pos.col,
        })
    }
}
