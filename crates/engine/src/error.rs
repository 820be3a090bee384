use std::path::PathBuf;

use sixres_core::{Piece, Rotation};
use thiserror::Error;

/// Fatal problems in a geometry table. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("line {line}: unknown section {name:?}")]
    UnknownSection { line: usize, name: String },
    #[error("line {line}: record outside any section")]
    RecordOutsideSection { line: usize },
    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: unknown piece {token:?}")]
    UnknownPiece { line: usize, token: String },
    #[error("line {line}: unknown rotation {token:?}")]
    UnknownRotation { line: usize, token: String },
    #[error("line {line}: malformed offset list at {text:?}")]
    MalformedOffset { line: usize, text: String },
    #[error("line {line}: shape for {piece} {rotation} defined twice")]
    DuplicateShape {
        line: usize,
        piece: Piece,
        rotation: Rotation,
    },
    #[error("line {line}: kicks for {piece} {from}->{to} defined twice")]
    DuplicateKick {
        line: usize,
        piece: Piece,
        from: Rotation,
        to: Rotation,
    },
    #[error("line {line}: shape has no cells")]
    EmptyShape { line: usize },
    #[error("line {line}: kick list is empty")]
    EmptyKickList { line: usize },
    #[error("line {line}: kick from {rotation} to itself")]
    SelfKick { line: usize, rotation: Rotation },
    #[error("no shape defined for {piece} {rotation}")]
    MissingShape { piece: Piece, rotation: Rotation },
    #[error("failed to read geometry file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
