use thiserror::Error;

use crate::types::Side;

/// Every way an engine call can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Indexing outside the 8x8 grid. Callers are expected to guard against this.
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: u8, col: u8 },

    /// The square is not in the current legal-move set. Nothing was changed.
    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    /// Flip directions that were not derived from the current board.
    #[error("flip directions at ({row}, {col}) do not match the board")]
    InvalidFlipSet { row: u8, col: u8 },

    #[error("game is already over")]
    GameOver,

    #[error("{0} has no legal moves")]
    NoLegalMoves(Side),

    #[error("unknown difficulty {0}")]
    InvalidDifficulty(u8),

    #[error("invalid board text: {0}")]
    InvalidBoardText(String),
}
