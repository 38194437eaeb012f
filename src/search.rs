//! Depth-limited minimax over a single mutable board
//!
//! The search plays each move onto the caller's board and takes it back
//! before returning, so no position is ever copied below the root.

use log::{debug, info};
use rayon::prelude::*;

use crate::{
    board::{Outcome, Piece},
    error::BoardError,
    Board, SEARCH_DEPTH,
};

/// The evaluation of a position won by the Computer
pub const INFINITY: i32 = i32::MAX;
/// The evaluation of a position won by the Human
pub const NEG_INFINITY: i32 = -INFINITY;

/// Tunables for move selection
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// plies searched below each candidate move
    pub depth: usize,
    /// search root candidates on separate copies of the board in parallel
    pub parallel: bool,
}

impl SearchConfig {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            parallel: false,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(SEARCH_DEPTH)
    }
}

impl Board {
    /// Evaluates `column` played by the minimizing (Human) or maximizing
    /// (Computer) side, looking `depth` further plies ahead
    ///
    /// The board is mutated during the call and restored before it returns.
    pub fn search(&mut self, column: usize, depth: usize, minimizing: bool) -> Result<i32, BoardError> {
        if column >= self.cols() {
            return Err(BoardError::ColumnOutOfRange {
                column,
                cols: self.cols(),
            });
        }
        if !self.is_legal(column) {
            return Err(BoardError::IllegalMove { column });
        }
        Ok(self.minimax(column, depth, minimizing))
    }

    fn minimax(&mut self, column: usize, depth: usize, minimizing: bool) -> i32 {
        let outcome = self.push(column, Piece::from_minimizing(minimizing));
        let evaluation = self.evaluate(outcome, depth, minimizing);
        // undo the move, it is not being committed
        self.pop(column);
        evaluation
    }

    fn evaluate(&mut self, outcome: Outcome, depth: usize, minimizing: bool) -> i32 {
        match outcome {
            Outcome::Won if minimizing => NEG_INFINITY,
            Outcome::Won => INFINITY,
            Outcome::Draw => 0,
            Outcome::Ongoing if depth == 0 => self.score(),
            Outcome::Ongoing => {
                let replies = self.legal_moves();
                let scores = replies
                    .into_iter()
                    .map(|reply| self.minimax(reply, depth - 1, !minimizing));
                // the next mover is assumed to pick its best reply
                let best = if minimizing { scores.max() } else { scores.min() };
                // an ongoing position always has a reply
                best.unwrap_or(0)
            }
        }
    }
}

/// Picks the best column for `mover` in the current position
///
/// The Computer maximizes the evaluation and the Human minimizes it. Ties go
/// to the leftmost column, a later column must be strictly better to replace
/// it. Returns `None` when no column is playable.
pub fn best_move(board: &mut Board, mover: Piece, config: &SearchConfig) -> Option<usize> {
    let candidates = board.legal_moves();
    if candidates.is_empty() {
        info!("no legal moves for {:?}, skipping search", mover);
        return None;
    }
    let minimizing = mover.is_minimizing();

    let scores: Vec<i32> = if config.parallel {
        let root: &Board = board;
        candidates
            .par_iter()
            .map(|&column| root.clone().minimax(column, config.depth, minimizing))
            .collect()
    } else {
        candidates
            .iter()
            .map(|&column| board.minimax(column, config.depth, minimizing))
            .collect()
    };

    let mut best: Option<(usize, i32)> = None;
    for (&column, &score) in candidates.iter().zip(scores.iter()) {
        debug!("{:?} candidate column {}: {}", mover, column, score);
        let improves = match best {
            None => true,
            Some((_, best_score)) if minimizing => score < best_score,
            Some((_, best_score)) => score > best_score,
        };
        if improves {
            best = Some((column, score));
        }
    }

    best.map(|(column, score)| {
        info!(
            "{:?} plays column {} (evaluation {}, depth {})",
            mover, column, score, config.depth
        );
        column
    })
}

/// Commits the Human's move in `just_played` and returns the Computer's reply
///
/// Returns `None` if the Human's move ended the game.
pub fn choose_move(
    board: &mut Board,
    just_played: usize,
    config: &SearchConfig,
) -> Result<Option<usize>, BoardError> {
    let outcome = board.apply_move(just_played, Piece::Human)?;
    if outcome.is_over() {
        info!(
            "game over after Human plays column {} ({:?}), skipping search",
            just_played, outcome
        );
        return Ok(None);
    }
    Ok(best_move(board, Piece::Computer, config))
}
