//! Static evaluation used by the minimax search.
//!
//! Scores are from the point of view of the side passed in: positive means
//! that side is ahead.

use crate::board::Board;
use crate::movegen::mobility;
use crate::types::{BOARD_SIZE, CellState, NUM_SQUARES, Position, Side};

const MOBILITY_WEIGHT: f32 = 5.0;
const DISC_WEIGHT: f32 = 1.0;
/// Multiplier for decided games so any win outranks any heuristic score.
pub const WIN_SCALE: f32 = 10_000.0;

#[rustfmt::skip]
const SQUARE_WEIGHTS: [i16; NUM_SQUARES] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,   1,   1,   1,   1,  -2,  10,
      5,  -2,   1,   0,   0,   1,  -2,   5,
      5,  -2,   1,   0,   0,   1,  -2,   5,
     10,  -2,   1,   1,   1,   1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

/// Heuristic score of `board` for `side`.
pub fn evaluate(board: &Board, side: Side) -> f32 {
    let positional = positional_score(board, side) as f32;
    let mobility_diff = mobility(board, side) as f32 - mobility(board, side.opponent()) as f32;
    let own = board.count_of(side) as f32;
    let opp = board.count_of(side.opponent()) as f32;

    positional + MOBILITY_WEIGHT * mobility_diff + DISC_WEIGHT * (own - opp)
}

/// Exact outcome of a finished position for `side`, scaled by [`WIN_SCALE`].
pub fn terminal_score(board: &Board, side: Side) -> f32 {
    disc_differential(board, side) * WIN_SCALE
}

pub fn disc_differential(board: &Board, side: Side) -> f32 {
    board.count_of(side) as f32 - board.count_of(side.opponent()) as f32
}

fn positional_score(board: &Board, side: Side) -> i32 {
    let own = CellState::from(side);
    let mut score = 0i32;

    for (idx, &cell) in board.cells().iter().enumerate() {
        if cell == CellState::Empty {
            continue;
        }
        let Some(pos) = Position::from_index(idx) else {
            continue;
        };
        let weight = square_weight(board, pos);
        if cell == own {
            score += weight;
        } else {
            score -= weight;
        }
    }

    score
}

/// X- and C-squares are only dangerous while their corner is still open.
fn square_weight(board: &Board, pos: Position) -> i32 {
    let weight = SQUARE_WEIGHTS[pos.index()] as i32;
    match guarded_corner(pos) {
        Some(corner) if weight < 0 && board.at(corner) != CellState::Empty => 0,
        _ => weight,
    }
}

fn guarded_corner(pos: Position) -> Option<Position> {
    let last = (BOARD_SIZE - 1) as u8;
    let near = |v: u8| -> Option<u8> {
        match v {
            0 | 1 => Some(0),
            v if v + 1 >= last => Some(last),
            _ => None,
        }
    };
    let corner = Position {
        row: near(pos.row)?,
        col: near(pos.col)?,
    };
    (corner != pos).then_some(corner)
}
