//! A minimax agent for playing the board game 'Connect 4'
//!
//! The board is a grid of independently growing column stacks. The agent
//! looks a fixed number of plies ahead, scoring the leaves with a static
//! positional heuristic, and reuses one mutable board for the whole search.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{board::Board, search::{choose_move, SearchConfig}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::default();
//! // the human plays the middle column, the computer answers
//! let reply = choose_move(&mut board, 3, &SearchConfig::default())?;
//!
//! assert_eq!(reply, Some(1));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod score;

pub mod search;

pub mod snapshot;

pub mod worker;

pub mod display;


pub use board::{Board, Outcome, Piece};
pub use error::{BoardError, SnapshotError};
pub use search::{best_move, choose_move, SearchConfig};
pub use snapshot::BoardSnapshot;

/// The default number of rows on the game board
pub const DEFAULT_ROWS: usize = 6;

/// The default number of columns on the game board
pub const DEFAULT_COLS: usize = 7;

/// The length of a winning line
pub const CONNECT: usize = 4;

/// The default search depth in plies beyond the candidate move
pub const SEARCH_DEPTH: usize = 4;

// the default board must be able to hold a winning line in every direction
const_assert!(DEFAULT_ROWS >= CONNECT);
const_assert!(DEFAULT_COLS >= CONNECT);
// snapshot dimensions are stored as u16
const_assert!(DEFAULT_ROWS * DEFAULT_COLS <= u16::MAX as usize);
