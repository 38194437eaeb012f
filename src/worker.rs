//! Runs a search away from the calling thread
//!
//! The board is encoded into a snapshot and the bytes are moved to a new
//! thread, which rebuilds its own board. Only the chosen column comes back.

use log::trace;

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::{
    board::Piece,
    error::SnapshotError,
    search::{best_move, SearchConfig},
    Board, BoardSnapshot,
};

type SearchResult = Result<Option<usize>, SnapshotError>;

/// A search running on another thread
pub struct PendingMove {
    receiver: Receiver<SearchResult>,
    handle: JoinHandle<()>,
}

impl PendingMove {
    /// The result if the search has finished, without blocking
    pub fn try_recv(&self) -> Option<SearchResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(disconnected())),
        }
    }

    /// Blocks until the search finishes
    pub fn wait(self) -> SearchResult {
        let result = self.receiver.recv().unwrap_or_else(|_| Err(disconnected()));
        // the sender is gone by now, so the thread has returned
        let _ = self.handle.join();
        result
    }
}

fn disconnected() -> SnapshotError {
    SnapshotError::Io(std::io::Error::new(
        std::io::ErrorKind::BrokenPipe,
        "search thread exited without a result",
    ))
}

/// Starts searching for `mover`'s best column on a copy of `board`
pub fn spawn_best_move(
    board: &Board,
    mover: Piece,
    config: SearchConfig,
) -> Result<PendingMove, SnapshotError> {
    let message = board.snapshot().encode()?;
    let (tx, rx) = channel();

    let handle = thread::spawn(move || {
        trace!("search thread received {} byte snapshot", message.len());
        let result = BoardSnapshot::decode(&message)
            .and_then(|snapshot| Board::from_snapshot(snapshot).map_err(SnapshotError::from))
            .map(|mut board| best_move(&mut board, mover, &config));
        // the receiver may have been dropped, nobody is waiting then
        let _ = tx.send(result);
        trace!("search thread finished");
    });

    Ok(PendingMove {
        receiver: rx,
        handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::{Duration, Instant};

    #[test]
    fn worker_agrees_with_inline_search() -> Result<(), SnapshotError> {
        let mut board = Board::from_moves(6, 7, "11223")?;
        let config = SearchConfig::default();

        let pending = spawn_best_move(&board, Piece::Computer, config)?;
        let inline = best_move(&mut board, Piece::Computer, &config);

        assert_eq!(pending.wait()?, inline);
        assert_eq!(inline, Some(3));
        Ok(())
    }

    #[test]
    fn polling_yields_the_result_once_ready() -> Result<(), SnapshotError> {
        let board = Board::from_moves(6, 7, "4")?;
        let pending = spawn_best_move(&board, Piece::Computer, SearchConfig::new(2))?;

        let deadline = Instant::now() + Duration::from_secs(30);
        let polled = loop {
            if let Some(result) = pending.try_recv() {
                break result?;
            }
            assert!(Instant::now() < deadline, "search thread never answered");
            thread::sleep(Duration::from_millis(1));
        };

        let mut inline = board.clone();
        assert_eq!(polled, best_move(&mut inline, Piece::Computer, &SearchConfig::new(2)));
        assert!(polled.is_some());
        // the result is handed out only once
        assert!(matches!(pending.wait(), Err(SnapshotError::Io(_))));
        Ok(())
    }
}
