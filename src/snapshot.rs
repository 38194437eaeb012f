//! Plain serialized form of a board
//!
//! A snapshot carries nothing but the dimensions and the column stacks, so it
//! can cross a thread boundary without exposing the board itself.
//!
//! # Binary Layout
//!
//! ```text
//! u16 rows, u16 cols              (big endian)
//! per column: u16 height, then `height` bytes bottom first
//!   0 = Human, 1 = Computer
//! ```

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use std::io::{Cursor, Read, Write};

use crate::{
    board::Piece,
    error::{BoardError, SnapshotError},
    Board,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub columns: Vec<Vec<Piece>>,
}

fn piece_tag(piece: Piece) -> u8 {
    match piece {
        Piece::Human => 0,
        Piece::Computer => 1,
    }
}

fn tag_piece(tag: u8) -> Result<Piece, SnapshotError> {
    match tag {
        0 => Ok(Piece::Human),
        1 => Ok(Piece::Computer),
        _ => Err(SnapshotError::UnknownPiece(tag)),
    }
}

fn to_u16(value: usize, what: &str) -> Result<u16, BoardError> {
    u16::try_from(value)
        .map_err(|_| BoardError::Malformed(format!("{} {} does not fit in a snapshot", what, value)))
}

impl BoardSnapshot {
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SnapshotError> {
        writer.write_u16::<BigEndian>(to_u16(self.rows, "row count")?)?;
        writer.write_u16::<BigEndian>(to_u16(self.cols, "column count")?)?;
        for stack in &self.columns {
            writer.write_u16::<BigEndian>(to_u16(stack.len(), "column height")?)?;
            for &piece in stack {
                writer.write_u8(piece_tag(piece))?;
            }
        }
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, SnapshotError> {
        let rows = reader.read_u16::<BigEndian>()? as usize;
        let cols = reader.read_u16::<BigEndian>()? as usize;

        let mut columns = Vec::with_capacity(cols);
        for _ in 0..cols {
            let height = reader.read_u16::<BigEndian>()? as usize;
            let mut stack = Vec::with_capacity(height);
            for _ in 0..height {
                stack.push(tag_piece(reader.read_u8()?)?);
            }
            columns.push(stack);
        }
        Ok(Self { rows, cols, columns })
    }

    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        let mut bytes = Vec::with_capacity(4 + self.columns.iter().map(|c| 2 + c.len()).sum::<usize>());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Decodes a snapshot, which must span the whole buffer
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let mut cursor = Cursor::new(bytes);
        let snapshot = Self::read_from(&mut cursor)?;
        let trailing = bytes.len() - cursor.position() as usize;
        if trailing != 0 {
            return Err(SnapshotError::TrailingBytes(trailing));
        }
        Ok(snapshot)
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.rows(),
            cols: self.cols(),
            columns: (0..self.cols()).map(|c| self.column(c).to_vec()).collect(),
        }
    }

    /// Rebuilds a board from a snapshot, rejecting inconsistent dimensions
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self, BoardError> {
        Board::from_columns(snapshot.rows, snapshot.cols, snapshot.columns)
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        Board::from_snapshot(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_layout() -> Result<(), SnapshotError> {
        let board = Board::from_moves(2, 3, "12")?;
        let bytes = board.snapshot().encode()?;
        assert_eq!(bytes, vec![0, 2, 0, 3, 0, 1, 0, 0, 1, 1, 0, 0]);

        let decoded = Board::from_snapshot(BoardSnapshot::decode(&bytes)?)?;
        assert_eq!(decoded, board);
        Ok(())
    }

    #[test]
    fn rejects_bad_data() {
        // unknown piece tag
        assert!(matches!(
            BoardSnapshot::decode(&[0, 1, 0, 1, 0, 1, 7]),
            Err(SnapshotError::UnknownPiece(7))
        ));
        // truncated
        assert!(matches!(
            BoardSnapshot::decode(&[0, 1, 0, 2, 0, 0]),
            Err(SnapshotError::Io(_))
        ));
        assert!(matches!(
            BoardSnapshot::decode(&[0, 1, 0, 1, 0, 0, 9]),
            Err(SnapshotError::TrailingBytes(1))
        ));
    }

    #[test]
    fn overfull_column_is_malformed() -> Result<(), SnapshotError> {
        let snapshot = BoardSnapshot::decode(&[0, 1, 0, 1, 0, 2, 0, 1])?;
        assert!(matches!(
            Board::try_from(snapshot),
            Err(BoardError::Malformed(_))
        ));
        Ok(())
    }
}
