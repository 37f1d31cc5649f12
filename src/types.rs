use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A board coordinate, `(row, col)` with both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Builds a position, rejecting anything off the 8x8 grid.
    pub fn new(row: u8, col: u8) -> Result<Self, EngineError> {
        let pos = Self { row, col };
        if pos.is_on_board() {
            Ok(pos)
        } else {
            Err(EngineError::OutOfBounds { row, col })
        }
    }

    pub fn is_on_board(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        (idx < NUM_SQUARES).then(|| Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        })
    }

    /// Row-major index in `0..64`.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn is_corner(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }

    /// Edge squares, corners excluded.
    pub fn is_edge(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        let on_border = self.row == 0 || self.row == last || self.col == 0 || self.col == last;
        on_border && !self.is_corner()
    }

    pub(crate) fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        let range = 0..BOARD_SIZE as i8;
        (range.contains(&row) && range.contains(&col)).then(|| Self {
            row: row as u8,
            col: col as u8,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => f.write_str("black"),
            Side::White => f.write_str("white"),
        }
    }
}

/// Occupant of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Black,
    White,
}

impl CellState {
    pub fn side(self) -> Option<Side> {
        match self {
            CellState::Empty => None,
            CellState::Black => Some(Side::Black),
            CellState::White => Some(Side::White),
        }
    }

    /// 0=empty, 1=black, 2=white.
    pub fn as_u8(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Black => 1,
            CellState::White => 2,
        }
    }
}

impl From<Side> for CellState {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => CellState::Black,
            Side::White => CellState::White,
        }
    }
}

/// Final verdict of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Tie,
}

impl Winner {
    /// Strict disc-count comparison.
    pub fn from_counts(black: u8, white: u8) -> Self {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Winner::Black,
            std::cmp::Ordering::Less => Winner::White,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

/// Public game state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    /// `None` once the game is over.
    pub side_to_move: Option<Side>,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    pub consecutive_passes: u8,
    pub winner: Option<Winner>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Winner,
    pub black_count: u8,
    pub white_count: u8,
}
