use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use crate::{board::Piece, Board};

fn piece_color(cell: Option<Piece>) -> Color {
    match cell {
        Some(Piece::Human) => Color::Red,
        Some(Piece::Computer) => Color::Yellow,
        None => Color::DarkBlue,
    }
}

/// Column labels, 1-indexed and cycling through single digits
fn column_labels(cols: usize) -> String {
    (1..=cols).map(|x| (x % 10).to_string()).collect()
}

/// Terminal position of a cell given the position just below the bottom row
///
/// Rows that would sit above the top of the terminal are clamped to line 0.
fn cell_position((origin_x, origin_y): (u16, u16), row: usize, column: usize) -> (u16, u16) {
    (
        origin_x.saturating_add(column as u16),
        origin_y.saturating_sub(1).saturating_sub(row as u16),
    )
}

/// Draws the board in colour below the cursor, top row first
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    stdout.queue(PrintStyledContent(style(column_labels(board.cols()) + "\n")))?;
    for _ in 0..board.rows() {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    // the cursor now sits below the bottom row
    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..board.rows() {
        for column in 0..board.cols() {
            let (pos_x, pos_y) = cell_position((origin_x, origin_y), row, column);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(piece_color(board.get(row, column))),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
