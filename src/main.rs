use anyhow::{anyhow, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use std::io::{stdin, stdout, Stdin, Write};

use connect4_engine::{
    display::display, worker::spawn_best_move, Board, Outcome, Piece, SearchConfig,
    DEFAULT_COLS, DEFAULT_ROWS, SEARCH_DEPTH,
};

#[derive(Debug, Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax agent")]
struct Args {
    /// Number of rows on the board
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of columns on the board (at most 9 for keyboard input)
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: usize,

    /// Plies searched below each candidate move
    #[arg(long, default_value_t = SEARCH_DEPTH)]
    depth: usize,

    /// Search the candidate moves on all cores
    #[arg(long)]
    parallel: bool,

    /// Let the AI move first without asking
    #[arg(long)]
    computer_first: bool,

    /// Let the AI play both sides
    #[arg(long)]
    self_play: bool,
}

fn player_name(piece: Piece) -> &'static str {
    match piece {
        Piece::Human => "Red",
        Piece::Computer => "Yellow",
    }
}

fn ask(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{}", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn read_move(stdin: &Stdin) -> Result<usize> {
    loop {
        print!("Move input > ");
        stdout().flush()?;
        let mut input_str = String::new();
        stdin.read_line(&mut input_str)?;

        match input_str.trim().parse::<usize>() {
            Ok(column @ 1..=usize::MAX) => return Ok(column - 1),
            _ => println!("Invalid number: {}", input_str.trim()),
        }
    }
}

/// The player's piece (if any) and the first mover, when the flags decide it
fn seating(args: &Args) -> Option<(Option<Piece>, Piece)> {
    if args.self_play {
        Some((None, Piece::Human))
    } else if args.computer_first {
        Some((Some(Piece::Human), Piece::Computer))
    } else {
        None
    }
}

/// Searches on a worker thread while a spinner runs
fn think(board: &Board, mover: Piece, config: SearchConfig) -> Result<usize> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
    spinner.set_message("AI is thinking...");
    spinner.enable_steady_tick(100);

    let pending = spawn_best_move(board, mover, config)?;
    let best_move = pending.wait();
    spinner.finish_and_clear();

    let column = best_move?.ok_or_else(|| anyhow!("no legal moves left"))?;
    println!("{} plays column {}", player_name(mover), column + 1);
    Ok(column)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut board = Board::new(args.rows, args.cols)?;
    let config = SearchConfig::new(args.depth).with_parallel(args.parallel);
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // the player is always the Human piece, the AI plays both sides in self-play
    let (human, mut mover) = match seating(&args) {
        Some(seating) => seating,
        None if ask(&stdin, "Would you like to move first? y/n: ")? => {
            (Some(Piece::Human), Piece::Human)
        }
        None => (Some(Piece::Human), Piece::Computer),
    };

    // game loop
    loop {
        display(&board)?;

        // the AI searches from the perspective of whichever side it plays
        let column = if human == Some(mover) {
            read_move(&stdin)?
        } else {
            think(&board, mover, config)?
        };

        match board.apply_move(column, mover) {
            Err(err) => {
                println!("{}", err);
                // try the move again
                continue;
            }
            Ok(Outcome::Ongoing) => mover = mover.opponent(),
            Ok(Outcome::Won) => {
                display(&board)?;
                println!("{} wins!", player_name(mover));
                break;
            }
            Ok(Outcome::Draw) => {
                display(&board)?;
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
