/// Errors raised by board construction and move application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("Invalid move, column {column} full")]
    IllegalMove { column: usize },

    #[error("Invalid move, column {column} out of range. Columns must be below {cols}")]
    ColumnOutOfRange { column: usize, cols: usize },

    #[error("invalid board dimensions {rows}x{cols}, both must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("malformed board: {0}")]
    Malformed(String),

    #[error("could not parse '{0}' as a valid move")]
    InvalidMoveChar(char),

    #[error("Invalid position, game is over")]
    GameOver,
}

/// Errors raised while decoding a serialized board.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown piece tag {0}")]
    UnknownPiece(u8),

    #[error("{0} trailing bytes after board data")]
    TrailingBytes(usize),

    #[error(transparent)]
    Board(#[from] BoardError),
}
