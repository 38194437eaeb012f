//! Static evaluation of a position
//!
//! Every line of the board is swept once per direction with a window of
//! `CONNECT` cells. A window that only holds tiles of one player (and empty
//! cells) is worth more the more tiles it holds. Computer windows count
//! positively, Human windows negatively.

use crate::{board::Piece, Board, CONNECT};

#[derive(Copy, Clone, Debug)]
enum Direction {
    Horizontal,
    Vertical,
    /// diagonal /
    Rising,
    /// diagonal \
    Falling,
}

impl Direction {
    fn step(self, (row, column): (usize, usize), i: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (row, column + i),
            Direction::Vertical => (row + i, column),
            Direction::Rising => (row + i, column + i),
            Direction::Falling => (row + i, column - i),
        }
    }
}

/// The value of a full window given how many of its cells the owner holds
fn window_value(pieces: usize) -> i32 {
    match pieces {
        3 => 2,
        2 => 1,
        // a complete line is a finished game and never evaluated
        _ => 0,
    }
}

impl Board {
    /// Scores the position, positive favours the Computer
    ///
    /// Only used at the search horizon; won positions are scored by the search
    pub fn score(&self) -> i32 {
        let (rows, cols) = (self.rows(), self.cols());
        let mut score = 0;

        for row in 0..rows {
            score += self.score_line((row, 0), Direction::Horizontal);
        }
        for column in 0..cols {
            score += self.score_line((0, column), Direction::Vertical);
        }

        // diagonals start on the bottom edge, then climb the side they lean away from
        for column in 0..cols {
            score += self.score_line((0, column), Direction::Rising);
        }
        for row in 1..rows {
            score += self.score_line((row, 0), Direction::Rising);
        }
        for column in 0..cols {
            score += self.score_line((0, column), Direction::Falling);
        }
        for row in 1..rows {
            score += self.score_line((row, cols - 1), Direction::Falling);
        }

        score
    }

    fn line_length(&self, (row, column): (usize, usize), direction: Direction) -> usize {
        let (rows, cols) = (self.rows(), self.cols());
        match direction {
            Direction::Horizontal => cols - column,
            Direction::Vertical => rows - row,
            Direction::Rising => (rows - row).min(cols - column),
            Direction::Falling => (rows - row).min(column + 1),
        }
    }

    /// Scores one line with a sliding window
    ///
    /// `length` counts the cells since the current owner's run began (empty
    /// cells before the first tile included) and `pieces` the owner's tiles
    /// inside the trailing window, so each cell is visited once.
    fn score_line(&self, start: (usize, usize), direction: Direction) -> i32 {
        let len = self.line_length(start, direction);
        let cell = |i: usize| {
            let (row, column) = direction.step(start, i);
            self.get(row, column)
        };

        // skip empty cells until the first tile
        let mut i = 0;
        let mut length = 0;
        let mut owner = None;
        while i < len && owner.is_none() {
            owner = cell(i);
            length += 1;
            i += 1;
        }
        let mut owner = match owner {
            Some(piece) => piece,
            None => return 0,
        };

        let mut score = 0;
        let mut pieces = 1;
        for i in i..len {
            match cell(i) {
                Some(piece) if piece == owner => {
                    length += 1;
                    pieces += 1;
                }
                Some(piece) => {
                    owner = piece;
                    length = 1;
                    pieces = 1;
                }
                None => length += 1,
            }

            if length >= CONNECT {
                match owner {
                    Piece::Computer => score += window_value(pieces),
                    Piece::Human => score -= window_value(pieces),
                }
                // the oldest cell leaves the window on the next step
                if cell(i + 1 - CONNECT).is_some() {
                    pieces -= 1;
                }
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, Piece};

    fn board_with(columns: &[(usize, Piece)]) -> Board {
        let mut board = Board::default();
        for &(column, piece) in columns {
            board.apply_move(column, piece).unwrap();
        }
        board
    }

    #[test]
    fn empty_board_scores_zero() {
        assert_eq!(Board::default().score(), 0);
        assert_eq!(Board::new(4, 4).unwrap().score(), 0);
    }

    #[test]
    fn single_tiles_are_worthless() {
        assert_eq!(board_with(&[(3, Piece::Human)]).score(), 0);
        assert_eq!(board_with(&[(3, Piece::Human), (3, Piece::Computer)]).score(), 0);
    }

    #[test]
    fn open_row_windows() {
        let two = board_with(&[(0, Piece::Computer), (1, Piece::Computer)]);
        assert_eq!(two.score(), 1);

        let three = board_with(&[(0, Piece::Computer), (1, Piece::Computer), (2, Piece::Computer)]);
        assert_eq!(three.score(), 3);

        let human = board_with(&[(0, Piece::Human), (1, Piece::Human), (2, Piece::Human)]);
        assert_eq!(human.score(), -3);
    }

    #[test]
    fn open_column_windows() {
        let stacked = board_with(&[(0, Piece::Computer), (0, Piece::Computer), (0, Piece::Computer)]);
        assert_eq!(stacked.score(), 3);
    }

    #[test]
    fn falling_diagonal_reaches_the_left_edge() {
        let board = Board::from_columns(
            6,
            7,
            vec![
                vec![],
                vec![Piece::Human, Piece::Human, Piece::Computer],
                vec![Piece::Human, Piece::Computer],
                vec![Piece::Computer],
                vec![],
                vec![],
                vec![],
            ],
        )
        .unwrap();
        assert_eq!(board.score(), 2);
    }
}
