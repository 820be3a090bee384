//! sixres core crate - fundamental types for the combo bot.

mod board;
mod input;
mod piece;
mod placement;
mod sequences;
mod state;

pub use board::{Board, BoardError, Cell, MAX_WIDTH, SPAWN_MARGIN};
pub use input::{InputAction, KeySequence};
pub use piece::{Piece, Rotation};
pub use placement::{Placement, PoseKey, Source};
pub use sequences::{sequences, shortlex, Sequences};
pub use state::GameState;
