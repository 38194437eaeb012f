use std::fmt;

use crate::{error::BoardError, CONNECT, DEFAULT_COLS, DEFAULT_ROWS};

/// The owner of a placed tile
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Piece {
    Human,
    Computer,
}

impl Piece {
    pub fn opponent(self) -> Self {
        match self {
            Piece::Human => Piece::Computer,
            Piece::Computer => Piece::Human,
        }
    }

    /// Whether this piece's mover tries to minimize the evaluation
    pub fn is_minimizing(self) -> bool {
        matches!(self, Piece::Human)
    }

    pub fn from_minimizing(minimizing: bool) -> Self {
        if minimizing {
            Piece::Human
        } else {
            Piece::Computer
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            Piece::Human => 'X',
            Piece::Computer => 'O',
        }
    }
}

/// The result of placing a tile
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Ongoing,
    /// the mover completed a line
    Won,
    /// the board filled up without a line
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// A Connect 4 board stored as one stack per column
///
/// Cells are addressed `(row, column)` with row 0 at the bottom. A cell
/// exists only below the column's height, everything above is empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    columns: Vec<Vec<Piece>>,
}

impl Board {
    /// Creates an empty board of the given size
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            columns: vec![Vec::with_capacity(rows); cols],
        })
    }

    /// Rebuilds a board from its column stacks, rejecting inconsistent data
    pub fn from_columns(
        rows: usize,
        cols: usize,
        columns: Vec<Vec<Piece>>,
    ) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        if columns.len() != cols {
            return Err(BoardError::Malformed(format!(
                "expected {} columns, found {}",
                cols,
                columns.len()
            )));
        }
        if let Some((column, stack)) = columns
            .iter()
            .enumerate()
            .find(|(_, stack)| stack.len() > rows)
        {
            return Err(BoardError::Malformed(format!(
                "column {} holds {} pieces but the board has {} rows",
                column,
                stack.len(),
                rows
            )));
        }
        Ok(Self {
            rows,
            cols,
            columns,
        })
    }

    /// Plays a sequence of 1-indexed column digits, Human moving first
    pub fn from_moves<S: AsRef<str>>(rows: usize, cols: usize, moves: S) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, cols)?;
        let mut piece = Piece::Human;
        let mut finished = false;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=9) if column <= cols => {
                    // abort if the position is already decided
                    if finished {
                        return Err(BoardError::GameOver);
                    }
                    finished = board.apply_move(column - 1, piece)?.is_over();
                    piece = piece.opponent();
                }
                _ => return Err(BoardError::InvalidMoveChar(column_char)),
            }
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The tile at `(row, column)`, `None` when empty or off the board
    pub fn get(&self, row: usize, column: usize) -> Option<Piece> {
        self.columns
            .get(column)
            .and_then(|stack| stack.get(row))
            .copied()
    }

    /// The stack of a column, bottom first
    ///
    /// # Panics
    /// If `column` is not below `cols()`
    pub fn column(&self, column: usize) -> &[Piece] {
        &self.columns[column]
    }

    /// The number of tiles in a column
    ///
    /// # Panics
    /// If `column` is not below `cols()`
    pub fn height(&self, column: usize) -> usize {
        self.columns[column].len()
    }

    pub fn num_pieces(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_legal(&self, column: usize) -> bool {
        column < self.cols && self.height(column) < self.rows
    }

    /// Playable columns, left to right. Empty when the board is full
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cols).filter(|&column| self.is_legal(column)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.columns.iter().all(|stack| stack.len() == self.rows)
    }

    /// Drops `piece` into `column` and reports whether the game ended
    pub fn apply_move(&mut self, column: usize, piece: Piece) -> Result<Outcome, BoardError> {
        if column >= self.cols {
            return Err(BoardError::ColumnOutOfRange {
                column,
                cols: self.cols,
            });
        }
        if !self.is_legal(column) {
            return Err(BoardError::IllegalMove { column });
        }
        Ok(self.push(column, piece))
    }

    /// Removes the top tile of `column`, undoing the last move played there
    pub fn pop(&mut self, column: usize) -> Option<Piece> {
        self.columns.get_mut(column).and_then(Vec::pop)
    }

    // legality must be checked by the caller
    pub(crate) fn push(&mut self, column: usize, piece: Piece) -> Outcome {
        debug_assert!(self.is_legal(column));
        self.columns[column].push(piece);

        // a full board can still end on a winning tile
        let outcome = if self.completes_line(column) {
            Outcome::Won
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        };
        // a reconstructed board may already hold a line, so only `Won` is cross-checked
        debug_assert!(
            outcome != Outcome::Won || self.scan_for_line(piece),
            "win reported without a line on the board after column {}",
            column
        );
        debug_assert!(
            outcome != Outcome::Draw || self.is_full(),
            "draw reported with free cells left"
        );
        outcome
    }

    /// Looks for a line of `piece` anywhere on the board, for debug checks
    fn scan_for_line(&self, piece: Piece) -> bool {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let directions = [(0, 1), (1, 0), (1, 1), (1, -1)];
        (0..rows).any(|row| {
            (0..cols).any(|column| {
                directions.iter().any(|&(dr, dc)| {
                    (0..CONNECT as isize).all(|i| {
                        let (r, c) = (row + dr * i, column + dc * i);
                        r >= 0 && c >= 0 && c < cols && self.get(r as usize, c as usize) == Some(piece)
                    })
                })
            })
        })
    }

    /// Checks for a line through the top tile of `column` only
    fn completes_line(&self, column: usize) -> bool {
        let stack = &self.columns[column];
        let piece = match stack.last() {
            Some(&piece) => piece,
            None => return false,
        };
        let row = stack.len() - 1;
        // a line needs at most this many cells on either side of the new tile
        let reach = CONNECT - 1;

        // check vertical alignment
        if stack.len() >= CONNECT && stack[stack.len() - CONNECT..].iter().all(|&p| p == piece) {
            return true;
        }

        // check horizontal alignment
        let lower = column.saturating_sub(reach);
        let upper = (column + CONNECT).min(self.cols);
        if self.has_line(piece, (lower..upper).map(|c| (row, c))) {
            return true;
        }

        // check diagonal alignment /
        let below = row.min(column).min(reach);
        let above = (self.rows - row - 1).min(self.cols - column - 1).min(reach);
        let cells = (0..=below + above).map(|i| (row - below + i, column - below + i));
        if self.has_line(piece, cells) {
            return true;
        }

        // check diagonal alignment \
        let below = row.min(self.cols - column - 1).min(reach);
        let above = (self.rows - row - 1).min(column).min(reach);
        let cells = (0..=below + above).map(|i| (row - below + i, column + below - i));
        self.has_line(piece, cells)
    }

    fn has_line<I>(&self, piece: Piece, cells: I) -> bool
    where
        I: Iterator<Item = (usize, usize)>,
    {
        let mut run = 0;
        for (row, column) in cells {
            if self.get(row, column) == Some(piece) {
                run += 1;
                if run == CONNECT {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            columns: vec![Vec::with_capacity(DEFAULT_ROWS); DEFAULT_COLS],
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            let line: String = (0..self.cols)
                .map(|column| self.get(row, column).map_or('.', Piece::symbol))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(
            Board::new(0, 7),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 7 })
        );
        assert!(Board::new(6, 0).is_err());
    }

    #[test]
    fn full_column_is_illegal() {
        let mut board = Board::new(2, 3).unwrap();
        board.apply_move(1, Piece::Human).unwrap();
        board.apply_move(1, Piece::Computer).unwrap();

        assert!(!board.is_legal(1));
        assert_eq!(board.legal_moves(), vec![0, 2]);
        assert_eq!(
            board.apply_move(1, Piece::Human),
            Err(BoardError::IllegalMove { column: 1 })
        );
        assert_eq!(
            board.apply_move(3, Piece::Human),
            Err(BoardError::ColumnOutOfRange { column: 3, cols: 3 })
        );
        // rejected moves leave the board untouched
        assert_eq!(board.num_pieces(), 2);
    }

    #[test]
    fn vertical_win() {
        let mut board = Board::default();
        for _ in 0..3 {
            assert_eq!(board.apply_move(0, Piece::Computer), Ok(Outcome::Ongoing));
        }
        assert_eq!(board.apply_move(0, Piece::Computer), Ok(Outcome::Won));
    }

    #[test]
    fn horizontal_win_filled_from_the_middle() {
        let mut board = Board::default();
        for column in [6, 4, 5] {
            assert_eq!(board.apply_move(column, Piece::Human), Ok(Outcome::Ongoing));
        }
        assert_eq!(board.apply_move(3, Piece::Human), Ok(Outcome::Won));
    }

    #[test]
    fn interrupted_row_is_not_a_win() {
        let mut board = Board::default();
        for (column, piece) in [
            (0, Piece::Human),
            (1, Piece::Human),
            (2, Piece::Computer),
            (3, Piece::Human),
            (4, Piece::Human),
        ] {
            assert_eq!(board.apply_move(column, piece), Ok(Outcome::Ongoing));
        }
    }

    #[test]
    fn both_diagonals() -> Result<(), BoardError> {
        // "/" completed at its upper end
        let mut board = Board::from_moves(6, 7, "1223343454")?;
        assert_eq!(board.apply_move(3, Piece::Human)?, Outcome::Won);

        let mut board = Board::new(6, 7)?;
        for (column, height) in [(3, 0), (2, 1), (1, 2)] {
            for _ in 0..height {
                board.apply_move(column, Piece::Computer)?;
            }
            board.apply_move(column, Piece::Human)?;
        }
        for _ in 0..3 {
            board.apply_move(0, Piece::Computer)?;
        }
        // "\" completed at its upper end
        assert_eq!(board.apply_move(0, Piece::Human)?, Outcome::Won);
        Ok(())
    }

    #[test]
    fn from_moves_stops_at_game_over() {
        assert!(Board::from_moves(6, 7, "1212121").is_ok());
        assert_eq!(
            Board::from_moves(6, 7, "12121212"),
            Err(BoardError::GameOver)
        );
        assert_eq!(
            Board::from_moves(6, 7, "18"),
            Err(BoardError::InvalidMoveChar('8'))
        );
    }

    #[test]
    fn from_columns_validates() {
        assert!(Board::from_columns(2, 2, vec![vec![Piece::Human]; 3]).is_err());
        assert!(Board::from_columns(1, 2, vec![vec![Piece::Human; 2], vec![]]).is_err());
        let board = Board::from_columns(2, 2, vec![vec![Piece::Human], vec![]]).unwrap();
        assert_eq!(board.get(0, 0), Some(Piece::Human));
        assert_eq!(board.get(1, 0), None);
    }

    #[test]
    fn win_on_the_last_cell_is_not_a_draw() -> Result<(), BoardError> {
        let mut board = Board::new(1, 4)?;
        for column in 0..3 {
            assert_eq!(board.apply_move(column, Piece::Computer)?, Outcome::Ongoing);
        }
        assert_eq!(board.apply_move(3, Piece::Computer)?, Outcome::Won);
        assert!(board.is_full());

        let mut board = Board::new(1, 4)?;
        for (column, piece) in [Piece::Human, Piece::Computer, Piece::Human]
            .iter()
            .enumerate()
        {
            board.apply_move(column, *piece)?;
        }
        assert_eq!(board.apply_move(3, Piece::Computer)?, Outcome::Draw);
        Ok(())
    }

    #[test]
    #[should_panic]
    fn height_of_a_missing_column_panics() {
        Board::default().height(7);
    }

    #[test]
    fn display_renders_top_row_first() {
        let board = Board::from_moves(2, 3, "12").unwrap();
        assert_eq!(board.to_string(), "...\nXO.\n");
    }
}
