//! Game state representation.

use crate::{Board, Piece, Source};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_piece: Option<Piece>,
    pub hold: Option<Piece>,
    /// Preview pieces after the current one.
    pub queue: Vec<Piece>,
    /// Consecutive line-clearing placements.
    pub combo: u32,
    pub pieces_placed: u32,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    /// First piece becomes the current one.
    pub fn with_queue(board: Board, queue: Vec<Piece>) -> Self {
        let mut state = Self::new(board);
        state.refill(queue);
        state
    }

    /// Current piece followed by the preview.
    pub fn pieces(&self) -> Vec<Piece> {
        self.current_piece
            .into_iter()
            .chain(self.queue.iter().copied())
            .collect()
    }

    /// Append pieces to the preview, promoting one to current if needed.
    pub fn refill(&mut self, pieces: impl IntoIterator<Item = Piece>) {
        self.queue.extend(pieces);
        if self.current_piece.is_none() && !self.queue.is_empty() {
            self.current_piece = Some(self.queue.remove(0));
        }
    }

    /// Record a played ply: the board after line clears, the source used and the lines it cleared.
    /// Queue and hold move the same way the continuation search assumes.
    pub fn advance(&mut self, source: Source, board_after: Board, lines: u8) {
        match source {
            Source::Current => {
                self.current_piece = None;
            }
            Source::Hold => {
                self.hold = None;
            }
            Source::Next => {
                self.hold = self.current_piece.take();
                if !self.queue.is_empty() {
                    self.queue.remove(0);
                }
            }
        }
        if self.current_piece.is_none() && !self.queue.is_empty() {
            self.current_piece = Some(self.queue.remove(0));
        }

        self.board = board_after;
        self.pieces_placed += 1;
        self.combo = if lines > 0 { self.combo + 1 } else { 0 };
    }
}
