pub mod config;
pub mod evaluate;
pub mod search;
pub mod weighted;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use web_time::Duration;

use crate::board::Board;
use crate::error::EngineError;
use crate::game::MoveSelector;
use crate::movegen::CandidateMove;
use crate::types::{Position, Side};

pub use config::{CpuConfig, Difficulty, Policy};
use search::Searcher;
use weighted::ResponseCurve;

/// The CPU opponent: weighted-random or minimax depending on difficulty.
#[derive(Debug, Clone)]
pub struct CpuPlayer {
    config: CpuConfig,
    rng: ChaCha8Rng,
}

impl CpuPlayer {
    pub fn new(config: CpuConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(CpuConfig::default().with_seed(seed))
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }
}

impl Default for CpuPlayer {
    fn default() -> Self {
        Self::new(CpuConfig::default())
    }
}

impl MoveSelector for CpuPlayer {
    fn select_move(
        &mut self,
        board: &Board,
        side: Side,
        legal_moves: &[CandidateMove],
        difficulty: Difficulty,
    ) -> Result<Position, EngineError> {
        if legal_moves.is_empty() {
            return Err(EngineError::NoLegalMoves(side));
        }

        let policy = self.config.policy_for(difficulty);
        let choice = match policy {
            Policy::Weighted { exponent } => {
                weighted::select(legal_moves, ResponseCurve::new(exponent), &mut self.rng)
                    .ok_or(EngineError::NoLegalMoves(side))?
            }
            Policy::Minimax {
                depth,
                exact_solve_empties,
            } => {
                let timeout = Duration::from_millis(self.config.timeout_ms);
                Searcher::with_timeout(side, depth, timeout)
                    .exact_solve_below(exact_solve_empties)
                    .search(board, legal_moves)?
            }
        };

        debug!(
            ?side,
            ?difficulty,
            ?policy,
            row = choice.row,
            col = choice.col,
            "cpu move selected"
        );
        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::enumerate_legal_moves;

    #[test]
    fn fixed_seed_gives_repeatable_choices() {
        let board = Board::new();
        let legal = enumerate_legal_moves(&board, Side::Black);

        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let mut first = CpuPlayer::with_seed(7);
            let mut second = CpuPlayer::with_seed(7);
            let a: Vec<_> = (0..10)
                .map(|_| first.select_move(&board, Side::Black, &legal, difficulty))
                .collect();
            let b: Vec<_> = (0..10)
                .map(|_| second.select_move(&board, Side::Black, &legal, difficulty))
                .collect();

            assert_eq!(a, b);
        }
    }

    #[test]
    fn choice_is_always_a_legal_move() {
        let board = Board::new();
        let legal = enumerate_legal_moves(&board, Side::Black);
        let mut cpu = CpuPlayer::with_seed(3);

        for _ in 0..50 {
            let mv = cpu
                .select_move(&board, Side::Black, &legal, Difficulty::Normal)
                .unwrap();
            assert!(legal.iter().any(|m| m.position == mv));
        }
    }

    #[test]
    fn empty_move_list_is_a_contract_violation() {
        let mut cpu = CpuPlayer::default();

        assert_eq!(
            cpu.select_move(&Board::new(), Side::White, &[], Difficulty::Hard),
            Err(EngineError::NoLegalMoves(Side::White))
        );
    }

    #[test]
    fn hard_takes_the_corner() {
        let board = Board::from_rows(&[
            "........",
            ".B......",
            "..W.....",
            "....BW..",
            "........",
            "........",
            "........",
            "........",
        ])
        .unwrap();
        let legal = enumerate_legal_moves(&board, Side::White);
        let config = CpuConfig {
            hard: Policy::Minimax {
                depth: 1,
                exact_solve_empties: 0,
            },
            ..CpuConfig::default()
        };
        let mut cpu = CpuPlayer::new(config);

        assert_eq!(
            cpu.select_move(&board, Side::White, &legal, Difficulty::Hard),
            Ok(Position { row: 0, col: 0 })
        );
    }
}
