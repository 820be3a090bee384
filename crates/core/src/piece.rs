//! Piece kinds and rotation states.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        self.rotate(1)
    }

    pub fn ccw(self) -> Self {
        self.rotate(-1)
    }

    pub fn flip(self) -> Self {
        self.rotate(2)
    }

    /// Rotate by `delta` quarter turns clockwise (negative = counter-clockwise).
    pub fn rotate(self, delta: i8) -> Self {
        let idx = (self.index() as i8 + delta).rem_euclid(4);
        Self::from_index(idx as usize)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps modulo 4.
    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % 4]
    }

    /// Accepts compass letters (`N E S W`) and SRS state names (`0 R 2 L`).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' | '0' => Some(Rotation::North),
            'E' | 'R' => Some(Rotation::East),
            'S' | '2' => Some(Rotation::South),
            'W' | 'L' => Some(Rotation::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Rotation::North => 'N',
            Rotation::East => 'E',
            Rotation::South => 'S',
            Rotation::West => 'W',
        }
    }
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(Piece::I),
            'O' => Some(Piece::O),
            'T' => Some(Piece::T),
            'S' => Some(Piece::S),
            'Z' => Some(Piece::Z),
            'J' => Some(Piece::J),
            'L' => Some(Piece::L),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::T => 'T',
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::J => 'J',
            Piece::L => 'L',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
