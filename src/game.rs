use serde::Serialize;
use tracing::debug;

use crate::ai::{CpuPlayer, Difficulty};
use crate::apply::apply_move;
use crate::board::Board;
use crate::error::EngineError;
use crate::movegen::{CandidateMove, enumerate_legal_moves};
use crate::types::{CellState, GameResult, GameSnapshot, Position, Side, Winner};

/// Picks a move for the side to play. Implementations must only return
/// positions taken from `legal_moves`.
pub trait MoveSelector: Send {
    fn select_move(
        &mut self,
        board: &Board,
        side: Side,
        legal_moves: &[CandidateMove],
        difficulty: Difficulty,
    ) -> Result<Position, EngineError>;
}

/// Always plays the first legal move in board scan order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(
        &mut self,
        _board: &Board,
        side: Side,
        legal_moves: &[CandidateMove],
        _difficulty: Difficulty,
    ) -> Result<Position, EngineError> {
        legal_moves
            .first()
            .map(|m| m.position)
            .ok_or(EngineError::NoLegalMoves(side))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `side` has at least one legal move.
    AwaitingMove(Side),
    Terminal(Winner),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TurnRecord {
    Move {
        side: Side,
        position: Position,
        flips: Vec<Position>,
    },
    Pass {
        side: Side,
    },
}

/// Everything the presentation layer needs to show one accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub mover: Side,
    pub position: Position,
    /// Flipped discs in application order, with their new colour.
    pub applied_flips: Vec<(Position, CellState)>,
    /// Sides that had to pass after this move, in order.
    pub passes: Vec<Side>,
    pub next_state: GameSnapshot,
}

/// Turn manager: owns the authoritative board and resolves passes and game over.
pub struct Game {
    board: Board,
    phase: Phase,
    consecutive_passes: u8,
    black_count: u8,
    white_count: u8,
    candidates: Vec<CandidateMove>,
    history: Vec<TurnRecord>,
    selector: Box<dyn MoveSelector>,
}

impl Game {
    pub fn new(selector: Box<dyn MoveSelector>) -> Self {
        let board = Board::new();
        let (black_count, white_count) = board.disc_counts();
        Self {
            candidates: enumerate_legal_moves(&board, Side::Black),
            board,
            phase: Phase::AwaitingMove(Side::Black),
            consecutive_passes: 0,
            black_count,
            white_count,
            history: Vec::new(),
            selector,
        }
    }

    pub fn new_with_default_selector() -> Self {
        Self::new(Box::new(CpuPlayer::default()))
    }

    /// Starts from an arbitrary position with `side` to move. Passes are
    /// resolved immediately, so the game may already be over.
    pub fn from_position(board: Board, side: Side, selector: Box<dyn MoveSelector>) -> Self {
        let (black_count, white_count) = board.disc_counts();
        let mut game = Self {
            board,
            phase: Phase::AwaitingMove(side),
            consecutive_passes: 0,
            black_count,
            white_count,
            candidates: Vec::new(),
            history: Vec::new(),
            selector,
        };
        game.resolve_turn(side);
        game
    }

    /// Plays `pos` for the side to move.
    ///
    /// Fails with `IllegalMove` when `pos` is not a legal move; the game is
    /// left untouched in that case.
    pub fn play_move(&mut self, pos: Position) -> Result<MoveResult, EngineError> {
        let side = self.side_to_move().ok_or(EngineError::GameOver)?;
        let pos = Position::new(pos.row, pos.col)?;
        let candidate = self
            .candidates
            .iter()
            .find(|c| c.position == pos)
            .cloned()
            .ok_or(EngineError::IllegalMove {
                row: pos.row,
                col: pos.col,
            })?;

        let flips = apply_move(&mut self.board, side, pos, &candidate.flip_directions)?;
        self.record_tally(side, flips.len() as u8);
        self.consecutive_passes = 0;
        debug!(%side, row = pos.row, col = pos.col, flips = flips.len(), "move applied");

        let own = CellState::from(side);
        let applied_flips = flips.iter().map(|&p| (p, own)).collect();
        self.history.push(TurnRecord::Move {
            side,
            position: pos,
            flips,
        });

        let passes = self.resolve_turn(side.opponent());

        Ok(MoveResult {
            mover: side,
            position: pos,
            applied_flips,
            passes,
            next_state: self.snapshot(),
        })
    }

    /// Asks the selector for a move without playing it.
    pub fn cpu_move(&mut self, difficulty: Difficulty) -> Result<Position, EngineError> {
        let side = self.side_to_move().ok_or(EngineError::GameOver)?;
        let selected = self
            .selector
            .select_move(&self.board, side, &self.candidates, difficulty)?;

        if !self.candidates.iter().any(|c| c.position == selected) {
            return Err(EngineError::IllegalMove {
                row: selected.row,
                col: selected.col,
            });
        }

        Ok(selected)
    }

    pub fn play_cpu_turn(&mut self, difficulty: Difficulty) -> Result<MoveResult, EngineError> {
        let selected = self.cpu_move(difficulty)?;
        self.play_move(selected)
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        self.candidates.iter().map(|c| c.position).collect()
    }

    pub fn candidates(&self) -> &[CandidateMove] {
        &self.candidates
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn side_to_move(&self) -> Option<Side> {
        match self.phase {
            Phase::AwaitingMove(side) => Some(side),
            Phase::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    /// Returns `(black_count, white_count)`.
    pub fn disc_counts(&self) -> (u8, u8) {
        (self.black_count, self.white_count)
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            Phase::Terminal(winner) => Some(winner),
            Phase::AwaitingMove(_) => None,
        }
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            side_to_move: self.side_to_move(),
            black_count: self.black_count,
            white_count: self.white_count,
            is_game_over: self.is_terminal(),
            consecutive_passes: self.consecutive_passes,
            winner: self.winner(),
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        self.winner().map(|winner| GameResult {
            winner,
            black_count: self.black_count,
            white_count: self.white_count,
        })
    }

    /// Hands the turn to `side`, passing back and forth until someone can
    /// move or both sides have passed in a row. Returns the sides that passed.
    fn resolve_turn(&mut self, side: Side) -> Vec<Side> {
        let mut passes = Vec::new();
        let mut next = side;

        loop {
            let moves = enumerate_legal_moves(&self.board, next);
            if !moves.is_empty() {
                self.candidates = moves;
                self.phase = Phase::AwaitingMove(next);
                return passes;
            }

            self.consecutive_passes += 1;
            debug!(side = %next, consecutive = self.consecutive_passes, "turn passed");
            self.history.push(TurnRecord::Pass { side: next });
            passes.push(next);

            if self.consecutive_passes >= 2 {
                let winner = Winner::from_counts(self.black_count, self.white_count);
                debug!(?winner, black = self.black_count, white = self.white_count, "game over");
                self.candidates.clear();
                self.phase = Phase::Terminal(winner);
                return passes;
            }

            next = next.opponent();
        }
    }

    fn record_tally(&mut self, side: Side, flipped: u8) {
        let (own, opp) = match side {
            Side::Black => (&mut self.black_count, &mut self.white_count),
            Side::White => (&mut self.white_count, &mut self.black_count),
        };
        *own += 1 + flipped;
        *opp -= flipped;
        debug_assert_eq!(
            (self.black_count, self.white_count),
            self.board.disc_counts()
        );
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new_with_default_selector()
    }
}
