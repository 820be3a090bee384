//! Piece shapes and kick tables, loaded from a line-oriented text format.
//!
//! ```text
//! [shapes]
//! T N (-1,0)(0,0)(1,0)(0,1)
//! [kicks]
//! T N E (0,0)(-1,0)(-1,1)(0,-2)(-1,-2)
//! ```
//!
//! `#` starts a comment. Rotations are `N E S W` or `0 R 2 L`.
//! Every piece needs all four shapes; kick records are optional per transition.

use std::path::Path;
use std::sync::OnceLock;

use sixres_core::{Piece, Placement, Rotation};
use smallvec::SmallVec;
use tracing::debug;

use crate::error::GeometryError;
use crate::kicks::{KickList, KickTable};

/// Built-in SRS shapes.
pub const SHAPES: &str = include_str!("../data/shapes.txt");
/// Built-in SRS kicks with 180 kicks for J L S T Z.
pub const SRS_PLUS_KICKS: &str = include_str!("../data/srs_plus_kicks.txt");

pub type Cells = SmallVec<[(i8, i8); 4]>;

#[derive(Clone, Copy)]
enum Section {
    Shapes,
    Kicks,
}

/// Immutable shape and kick data shared by every simulation.
#[derive(Clone, Debug)]
pub struct Geometry {
    shapes: Vec<Cells>,
    kicks: KickTable,
}

impl Geometry {
    /// SRS shapes with SRS+ kicks, parsed once per process.
    pub fn standard() -> &'static Geometry {
        static STANDARD: OnceLock<Geometry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let text = format!("{SHAPES}\n{SRS_PLUS_KICKS}");
            match Geometry::parse(&text) {
                Ok(geometry) => geometry,
                Err(err) => panic!("embedded geometry is malformed: {err}"),
            }
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GeometryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, GeometryError> {
        let mut shapes: Vec<Option<Cells>> = vec![None; 28];
        let mut kicks = KickTable::default();
        let mut section = None;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }
            if content.starts_with('[') {
                section = Some(match content {
                    "[shapes]" => Section::Shapes,
                    "[kicks]" => Section::Kicks,
                    other => {
                        return Err(GeometryError::UnknownSection {
                            line,
                            name: other.to_string(),
                        })
                    }
                });
                continue;
            }

            let mut fields = content.split_whitespace();
            match section {
                None => return Err(GeometryError::RecordOutsideSection { line }),
                Some(Section::Shapes) => {
                    let piece = parse_piece(fields.next(), line)?;
                    let rotation = parse_rotation(fields.next(), line, "rotation")?;
                    let rest: String = fields.collect();
                    let cells: Cells = parse_offsets(&rest, line)?.into_iter().collect();
                    if cells.is_empty() {
                        return Err(GeometryError::EmptyShape { line });
                    }
                    let slot = &mut shapes[piece.index() * 4 + rotation.index()];
                    if slot.is_some() {
                        return Err(GeometryError::DuplicateShape {
                            line,
                            piece,
                            rotation,
                        });
                    }
                    *slot = Some(cells);
                }
                Some(Section::Kicks) => {
                    let piece = parse_piece(fields.next(), line)?;
                    let from = parse_rotation(fields.next(), line, "source rotation")?;
                    let to = parse_rotation(fields.next(), line, "target rotation")?;
                    if from == to {
                        return Err(GeometryError::SelfKick {
                            line,
                            rotation: from,
                        });
                    }
                    let rest: String = fields.collect();
                    let offsets: KickList = parse_offsets(&rest, line)?.into_iter().collect();
                    if offsets.is_empty() {
                        return Err(GeometryError::EmptyKickList { line });
                    }
                    if !kicks.insert(piece, from, to, offsets) {
                        return Err(GeometryError::DuplicateKick {
                            line,
                            piece,
                            from,
                            to,
                        });
                    }
                }
            }
        }

        let mut complete = Vec::with_capacity(shapes.len());
        for (idx, shape) in shapes.into_iter().enumerate() {
            let piece = Piece::ALL[idx / 4];
            let rotation = Rotation::from_index(idx % 4);
            complete.push(shape.ok_or(GeometryError::MissingShape { piece, rotation })?);
        }

        debug!(
            target: "sixres::geometry",
            kick_entries = kicks.len(),
            "geometry loaded"
        );
        Ok(Self {
            shapes: complete,
            kicks,
        })
    }

    /// Cell offsets of a piece in a rotation.
    #[inline]
    pub fn cells(&self, piece: Piece, rotation: Rotation) -> &[(i8, i8)] {
        &self.shapes[piece.index() * 4 + rotation.index()]
    }

    /// `None` when the table has no entry, i.e. the rotation cannot happen.
    #[inline]
    pub fn kicks(&self, piece: Piece, from: Rotation, to: Rotation) -> Option<&[(i8, i8)]> {
        self.kicks.get(piece, from, to)
    }

    /// Absolute board cells covered by a placement.
    pub fn placed_cells(&self, placement: &Placement) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (x, y) = (placement.x as i32, placement.y as i32);
        self.cells(placement.piece, placement.rotation)
            .iter()
            .map(move |&(dx, dy)| (x + dx as i32, y + dy as i32))
    }
}

fn parse_piece(token: Option<&str>, line: usize) -> Result<Piece, GeometryError> {
    let token = token.ok_or(GeometryError::MissingField {
        line,
        field: "piece",
    })?;
    let mut chars = token.chars();
    match (chars.next().and_then(Piece::from_char), chars.next()) {
        (Some(piece), None) => Ok(piece),
        _ => Err(GeometryError::UnknownPiece {
            line,
            token: token.to_string(),
        }),
    }
}

fn parse_rotation(
    token: Option<&str>,
    line: usize,
    field: &'static str,
) -> Result<Rotation, GeometryError> {
    let token = token.ok_or(GeometryError::MissingField { line, field })?;
    let mut chars = token.chars();
    match (chars.next().and_then(Rotation::from_char), chars.next()) {
        (Some(rotation), None) => Ok(rotation),
        _ => Err(GeometryError::UnknownRotation {
            line,
            token: token.to_string(),
        }),
    }
}

/// Parses `(dx,dy)(dx,dy)...` with whitespace already removed.
fn parse_offsets(text: &str, line: usize) -> Result<Vec<(i8, i8)>, GeometryError> {
    let malformed = |at: &str| GeometryError::MalformedOffset {
        line,
        text: at.to_string(),
    };

    let mut offsets = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let (pair, tail) = rest
            .strip_prefix('(')
            .and_then(|inner| inner.split_once(')'))
            .ok_or_else(|| malformed(rest))?;
        let (dx, dy) = pair.split_once(',').ok_or_else(|| malformed(rest))?;
        let dx = dx.parse::<i8>().map_err(|_| malformed(rest))?;
        let dy = dy.parse::<i8>().map_err(|_| malformed(rest))?;
        offsets.push((dx, dy));
        rest = tail;
    }
    Ok(offsets)
}
