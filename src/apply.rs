use crate::board::Board;
use crate::error::EngineError;
use crate::movegen::{CandidateMove, DIRECTIONS, FlipDirection, find_flip_directions, ray};
use crate::types::{CellState, Position, Side};

/// Places a `side` disc at `pos` and flips every disc named by `flip_directions`.
/// Returns flipped positions in application order.
///
/// The flip set is checked against the board before anything is written, so a
/// mismatched set fails with `InvalidFlipSet` and leaves the board unchanged.
pub fn apply_move(
    board: &mut Board,
    side: Side,
    pos: Position,
    flip_directions: &[FlipDirection],
) -> Result<Vec<Position>, EngineError> {
    let flips = collect_flips(board, side, pos, flip_directions)?;

    let own = CellState::from(side);
    board.put(pos, own);
    for &square in &flips {
        board.put(square, own);
    }

    Ok(flips)
}

/// Applies `candidate` to a copy of `board`, leaving the original untouched.
pub fn play_on_copy(
    board: &Board,
    side: Side,
    candidate: &CandidateMove,
) -> Result<Board, EngineError> {
    let mut next = *board;
    apply_move(&mut next, side, candidate.position, &candidate.flip_directions)?;
    Ok(next)
}

fn collect_flips(
    board: &Board,
    side: Side,
    pos: Position,
    flip_directions: &[FlipDirection],
) -> Result<Vec<Position>, EngineError> {
    let invalid = || EngineError::InvalidFlipSet {
        row: pos.row,
        col: pos.col,
    };

    if board.get(pos)? != CellState::Empty || flip_directions.is_empty() {
        return Err(invalid());
    }

    let own = CellState::from(side);
    let opp = CellState::from(side.opponent());
    let mut flips = Vec::new();

    for flip in flip_directions {
        let d = DIRECTIONS
            .iter()
            .position(|&candidate| candidate == flip.direction)
            .ok_or_else(invalid)?;
        let count = flip.flip_count as usize;
        let line = ray(pos, d);

        if count == 0 || line.len() <= count {
            return Err(invalid());
        }
        if line[..count].iter().any(|&square| board.at(square) != opp) {
            return Err(invalid());
        }
        if board.at(line[count]) != own {
            return Err(invalid());
        }
        if flips.iter().any(|seen| line[..count].contains(seen)) {
            return Err(invalid());
        }

        flips.extend_from_slice(&line[..count]);
    }

    // Every bracketed line must be flipped, not just a valid subset.
    let expected = find_flip_directions(board, side, pos);
    if expected.len() != flip_directions.len()
        || flip_directions.iter().any(|flip| !expected.contains(flip))
    {
        return Err(invalid());
    }

    Ok(flips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::{Direction, enumerate_legal_moves, find_flip_directions};

    fn pos(row: u8, col: u8) -> Position {
        Position { row, col }
    }

    #[test]
    fn place_flips_exactly_the_bracketed_disc() {
        let mut board = Board::new();
        let dirs = find_flip_directions(&board, Side::Black, pos(2, 4));

        let flips = apply_move(&mut board, Side::Black, pos(2, 4), &dirs).unwrap();

        assert_eq!(flips, vec![pos(3, 4)]);
        assert_eq!(board.disc_counts(), (4, 1));
        assert_eq!(board.empty_count(), 59);
        assert_eq!(board.get(pos(2, 4)), Ok(CellState::Black));
        assert_eq!(board.get(pos(3, 4)), Ok(CellState::Black));
        assert_eq!(board.get(pos(4, 3)), Ok(CellState::White));
    }

    #[test]
    fn counts_move_by_one_plus_total_flips() {
        let board = Board::from_rows(&[
            "B..B....",
            ".W.W....",
            "..WW....",
            "BWW.....",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();

        for candidate in enumerate_legal_moves(&board, Side::Black) {
            let (black, white) = board.disc_counts();
            let next = play_on_copy(&board, Side::Black, &candidate).unwrap();
            let (next_black, next_white) = next.disc_counts();

            assert_eq!(next_black, black + 1 + candidate.total_flips);
            assert_eq!(next_white, white - candidate.total_flips);
        }
    }

    #[test]
    fn play_on_copy_leaves_original_untouched() {
        let board = Board::new();
        let candidate = &enumerate_legal_moves(&board, Side::Black)[0];

        let next = play_on_copy(&board, Side::Black, candidate).unwrap();

        assert_eq!(board, Board::new());
        assert_ne!(next, board);
    }

    #[test]
    fn mismatched_flip_set_is_rejected_without_mutation() {
        let mut board = Board::new();
        let wrong = [FlipDirection {
            direction: Direction { d_row: 0, d_col: 1 },
            flip_count: 1,
        }];

        let err = apply_move(&mut board, Side::Black, pos(2, 4), &wrong).unwrap_err();

        assert_eq!(err, EngineError::InvalidFlipSet { row: 2, col: 4 });
        assert_eq!(board, Board::new());
    }

    #[test]
    fn overlong_flip_count_is_rejected() {
        let mut board = Board::new();
        let wrong = [FlipDirection {
            direction: Direction { d_row: 1, d_col: 0 },
            flip_count: 2,
        }];

        assert!(matches!(
            apply_move(&mut board, Side::Black, pos(2, 4), &wrong),
            Err(EngineError::InvalidFlipSet { .. })
        ));
    }

    #[test]
    fn partial_flip_set_is_rejected_without_mutation() {
        let mut board = Board::from_rows(&[
            "B..B....",
            ".W.W....",
            "..WW....",
            "BWW.....",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let before = board;
        let full = find_flip_directions(&board, Side::Black, pos(3, 3));
        let partial = [FlipDirection {
            direction: Direction {
                d_row: -1,
                d_col: -1,
            },
            flip_count: 2,
        }];

        assert_eq!(full.len(), 3);
        assert_eq!(
            apply_move(&mut board, Side::Black, pos(3, 3), &partial),
            Err(EngineError::InvalidFlipSet { row: 3, col: 3 })
        );
        assert_eq!(board, before);

        let mut shuffled = full.clone();
        shuffled.reverse();
        let flips = apply_move(&mut board, Side::Black, pos(3, 3), &shuffled).unwrap();
        assert_eq!(flips.len(), 6);
    }

    #[test]
    fn occupied_or_off_board_target_is_rejected() {
        let mut board = Board::new();
        let dirs = find_flip_directions(&board, Side::Black, pos(2, 4));

        assert!(matches!(
            apply_move(&mut board, Side::Black, pos(3, 3), &dirs),
            Err(EngineError::InvalidFlipSet { .. })
        ));
        assert_eq!(
            apply_move(&mut board, Side::Black, pos(8, 8), &dirs),
            Err(EngineError::OutOfBounds { row: 8, col: 8 })
        );
        assert_eq!(board, Board::new());
    }
}
