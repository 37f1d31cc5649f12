use wasm_bindgen::prelude::*;

pub mod ai;
pub mod apply;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod types;
pub mod wasm;

pub use ai::{CpuConfig, CpuPlayer, Difficulty, Policy};
pub use board::Board;
pub use error::EngineError;
pub use game::{FirstLegalMoveSelector, Game, MoveResult, MoveSelector, Phase, TurnRecord};
pub use movegen::{CandidateMove, Direction, FlipDirection};
pub use types::{CellState, GameResult, GameSnapshot, Position, Side, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
