//! Placement and pose-key definitions.

use crate::{Piece, Rotation};
use serde::{Deserialize, Serialize};

/// Where the piece played on a ply came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Head of the queue.
    Current,
    /// The held piece; the queue does not advance.
    Hold,
    /// Second queue piece, holding the current one.
    Next,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Current, Source::Hold, Source::Next];

    /// Whether playing from this source needs a hold press first.
    pub fn uses_hold(self) -> bool {
        !matches!(self, Source::Current)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Source::Current => "current",
            Source::Hold => "hold",
            Source::Next => "next",
        };
        f.write_str(name)
    }
}

/// `(x, y, rotation)` packed into one integer, used as a map key.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoseKey(u32);

impl PoseKey {
    #[inline]
    pub fn new(x: i8, y: i8, rotation: Rotation) -> Self {
        Self(((x as u8 as u32) << 16) | ((y as u8 as u32) << 8) | rotation.index() as u32)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn x(self) -> i8 {
        (self.0 >> 16) as u8 as i8
    }

    pub fn y(self) -> i8 {
        (self.0 >> 8) as u8 as i8
    }

    pub fn rotation(self) -> Rotation {
        Rotation::from_index((self.0 & 0xff) as usize)
    }
}

/// A frozen terminal pose, detached from any simulation.
/// Only meaningful against the board it was computed on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Placement {
    pub fn new(piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
        }
    }

    #[inline]
    pub fn key(&self) -> PoseKey {
        PoseKey::new(self.x, self.y, self.rotation)
    }

    /// Same pose, ignoring the piece kind.
    pub fn same_pose(&self, other: &Placement) -> bool {
        self.key() == other.key()
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}@({},{})", self.piece, self.rotation, self.x, self.y)
    }
}
