use tracing::trace;
use web_time::{Duration, Instant};

use crate::ai::evaluate::{evaluate, terminal_score};
use crate::apply::play_on_copy;
use crate::board::Board;
use crate::error::EngineError;
use crate::movegen::{CandidateMove, enumerate_legal_moves, has_legal_move};
use crate::types::{Position, Side};

const DEFAULT_TIMEOUT_MS: u64 = 2_000;
const MIN_SCORE: f32 = f32::NEG_INFINITY;
const MAX_SCORE: f32 = f32::INFINITY;
const TIE_MARGIN: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Interrupt {
    TimedOut,
    Engine(EngineError),
}

impl From<EngineError> for Interrupt {
    fn from(err: EngineError) -> Self {
        Interrupt::Engine(err)
    }
}

/// Depth-limited minimax with alpha-beta pruning, scored from `root`'s view.
pub struct Searcher {
    root: Side,
    max_depth: u8,
    exact_solve_empties: u8,
    start_time: Instant,
    timeout: Duration,
    root_depth: u8,
    exact: bool,
    timed_out: bool,
}

impl Searcher {
    pub fn new(root: Side, max_depth: u8) -> Self {
        Self::with_timeout(root, max_depth, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    pub fn with_timeout(root: Side, max_depth: u8, timeout: Duration) -> Self {
        Self {
            root,
            max_depth: max_depth.max(1),
            exact_solve_empties: 0,
            start_time: Instant::now(),
            timeout,
            root_depth: 0,
            exact: false,
            timed_out: false,
        }
    }

    /// Solve the rest of the game exactly once `empties` or fewer squares remain.
    pub fn exact_solve_below(mut self, empties: u8) -> Self {
        self.exact_solve_empties = empties;
        self
    }

    /// Searches the best move among `legal_moves` for `self.root`.
    ///
    /// Iterative deepening from depth 1; depth 1 always completes, deeper
    /// iterations are dropped once the timeout passes.
    pub fn search(
        &mut self,
        board: &Board,
        legal_moves: &[CandidateMove],
    ) -> Result<Position, EngineError> {
        self.start_time = Instant::now();
        self.timed_out = false;
        self.exact = false;

        let mut ordered = self.order_moves(board, legal_moves)?;
        let Some(first) = ordered.first() else {
            return Err(EngineError::NoLegalMoves(self.root));
        };
        let mut best_move = first.position;
        if ordered.len() == 1 {
            return Ok(best_move);
        }

        for depth in 1..=self.max_depth {
            self.root_depth = depth;
            match self.search_root(board, &ordered, depth) {
                Ok((mv, score)) => {
                    trace!(depth, score, row = mv.row, col = mv.col, "search depth complete");
                    best_move = mv;
                    promote(&mut ordered, mv);
                }
                Err(Interrupt::TimedOut) => break,
                Err(Interrupt::Engine(err)) => return Err(err),
            }
        }

        if self.should_exact_solve(board) && !self.timed_out {
            self.exact = true;
            let empties = board.empty_count();
            match self.search_root(board, &ordered, empties) {
                Ok((mv, score)) => {
                    trace!(score, row = mv.row, col = mv.col, "exact solve complete");
                    best_move = mv;
                }
                Err(Interrupt::TimedOut) => {}
                Err(Interrupt::Engine(err)) => return Err(err),
            }
        }

        Ok(best_move)
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Score of `board` with `depth` plies left. `maximizing` is true when it
    /// is `root`'s turn.
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
    ) -> Result<f32, Interrupt> {
        // Depth 1 of the iterative deepening is never interrupted.
        if (self.exact || self.root_depth > 1) && self.start_time.elapsed() >= self.timeout {
            self.timed_out = true;
            return Err(Interrupt::TimedOut);
        }

        let to_move = if maximizing { self.root } else { self.root.opponent() };
        let moves = enumerate_legal_moves(board, to_move);

        if moves.is_empty() {
            if !has_legal_move(board, to_move.opponent()) {
                return Ok(terminal_score(board, self.root));
            }
            // Pass: the turn changes hands without consuming depth.
            return self.minimax(board, depth, alpha, beta, !maximizing);
        }

        if depth == 0 {
            return Ok(self.leaf_score(board));
        }

        if maximizing {
            let mut best = MIN_SCORE;
            for mv in &moves {
                let next = play_on_copy(board, to_move, mv)?;
                let score = self.minimax(&next, depth - 1, alpha, beta, false)?;
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        } else {
            let mut best = MAX_SCORE;
            for mv in &moves {
                let next = play_on_copy(board, to_move, mv)?;
                let score = self.minimax(&next, depth - 1, alpha, beta, true)?;
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            Ok(best)
        }
    }

    fn search_root(
        &mut self,
        board: &Board,
        ordered: &[CandidateMove],
        depth: u8,
    ) -> Result<(Position, f32), Interrupt> {
        let mut best: Option<(Position, f32)> = None;

        for mv in ordered {
            // Scores are whole numbers; the margin keeps an equal score exact
            // so ties can fall back to board order.
            let alpha = best.map_or(MIN_SCORE, |(_, best_score)| best_score - TIE_MARGIN);
            let next = play_on_copy(board, self.root, mv)?;
            let score = self.minimax(&next, depth.saturating_sub(1), alpha, MAX_SCORE, false)?;
            let better = match best {
                None => true,
                Some((best_pos, best_score)) => {
                    score > best_score || (score == best_score && mv.position < best_pos)
                }
            };
            if better {
                best = Some((mv.position, score));
            }
        }

        best.ok_or(Interrupt::Engine(EngineError::NoLegalMoves(self.root)))
    }

    fn leaf_score(&self, board: &Board) -> f32 {
        if self.exact {
            terminal_score(board, self.root)
        } else {
            evaluate(board, self.root)
        }
    }

    fn should_exact_solve(&self, board: &Board) -> bool {
        board.empty_count() <= self.exact_solve_empties
    }

    /// One-ply ordering: best static score first, ties in board order.
    fn order_moves(
        &self,
        board: &Board,
        legal_moves: &[CandidateMove],
    ) -> Result<Vec<CandidateMove>, EngineError> {
        let mut scored = legal_moves
            .iter()
            .map(|mv| -> Result<(CandidateMove, f32), EngineError> {
                let next = play_on_copy(board, self.root, mv)?;
                Ok((mv.clone(), evaluate(&next, self.root)))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        scored.sort_by(|(left_mv, left_score), (right_mv, right_score)| {
            right_score
                .total_cmp(left_score)
                .then_with(|| left_mv.position.cmp(&right_mv.position))
        });

        Ok(scored.into_iter().map(|(mv, _)| mv).collect())
    }
}

/// Moves the previous iteration's best move to the front.
fn promote(ordered: &mut [CandidateMove], best: Position) {
    if let Some(idx) = ordered.iter().position(|mv| mv.position == best) {
        ordered[..=idx].rotate_right(1);
    }
}
