use once_cell::sync::Lazy;
use serde::Serialize;

use crate::board::Board;
use crate::types::{CellState, NUM_SQUARES, Position, Side};

/// A king-move step on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Direction {
    pub d_row: i8,
    pub d_col: i8,
}

const fn dir(d_row: i8, d_col: i8) -> Direction {
    Direction { d_row, d_col }
}

pub const DIRECTIONS: [Direction; 8] = [
    dir(-1, -1),
    dir(-1, 0),
    dir(-1, 1),
    dir(0, -1),
    dir(0, 1),
    dir(1, -1),
    dir(1, 0),
    dir(1, 1),
];

/// Squares visited when walking from a square in one direction, nearest first.
static RAYS: Lazy<[[Vec<Position>; 8]; NUM_SQUARES]> = Lazy::new(|| {
    std::array::from_fn(|idx| {
        std::array::from_fn(|d| {
            let step = DIRECTIONS[d];
            let mut ray = Vec::new();
            let mut cursor = Position::from_index(idx);
            while let Some(next) = cursor.and_then(|p| p.offset(step.d_row, step.d_col)) {
                ray.push(next);
                cursor = Some(next);
            }
            ray
        })
    })
});

pub(crate) fn ray(from: Position, direction_idx: usize) -> &'static [Position] {
    &RAYS[from.index()][direction_idx]
}

/// A direction in which placing a disc sandwiches `flip_count` opposing discs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlipDirection {
    pub direction: Direction,
    pub flip_count: u8,
}

/// A legal move with everything needed to apply it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateMove {
    pub position: Position,
    pub flip_directions: Vec<FlipDirection>,
    pub total_flips: u8,
}

/// Returns every direction in which a `side` disc at `pos` would flip
/// opposing discs. Empty for occupied or off-board squares.
pub fn find_flip_directions(board: &Board, side: Side, pos: Position) -> Vec<FlipDirection> {
    if !pos.is_on_board() || board.at(pos) != CellState::Empty {
        return Vec::new();
    }

    let own = CellState::from(side);
    let opp = CellState::from(side.opponent());

    DIRECTIONS
        .iter()
        .enumerate()
        .filter_map(|(d, &direction)| {
            let mut count = 0u8;
            for &square in ray(pos, d) {
                let cell = board.at(square);
                if cell == opp {
                    count += 1;
                } else if cell == own && count > 0 {
                    return Some(FlipDirection {
                        direction,
                        flip_count: count,
                    });
                } else {
                    return None;
                }
            }
            None
        })
        .collect()
}

pub fn is_legal(board: &Board, side: Side, pos: Position) -> bool {
    !find_flip_directions(board, side, pos).is_empty()
}

/// Scans all squares in row-major order and collects the legal moves.
pub fn enumerate_legal_moves(board: &Board, side: Side) -> Vec<CandidateMove> {
    squares()
        .filter_map(|position| {
            let flip_directions = find_flip_directions(board, side, position);
            if flip_directions.is_empty() {
                return None;
            }
            let total_flips = flip_directions.iter().map(|f| f.flip_count).sum();
            Some(CandidateMove {
                position,
                flip_directions,
                total_flips,
            })
        })
        .collect()
}

pub fn has_legal_move(board: &Board, side: Side) -> bool {
    squares().any(|pos| is_legal(board, side, pos))
}

pub fn mobility(board: &Board, side: Side) -> usize {
    squares().filter(|&pos| is_legal(board, side, pos)).count()
}

fn squares() -> impl Iterator<Item = Position> {
    (0..NUM_SQUARES).filter_map(Position::from_index)
}
