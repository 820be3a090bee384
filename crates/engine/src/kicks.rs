//! kick table - ordered offset candidates per (piece, from, to)

use sixres_core::{Piece, Rotation};
use smallvec::SmallVec;

pub type KickList = SmallVec<[(i8, i8); 6]>;

const SLOTS: usize = 7 * 16;

/// Flat table indexed by piece and transition. Empty slots mean the rotation is impossible.
#[derive(Clone, Debug)]
pub struct KickTable {
    entries: Vec<Option<KickList>>,
}

impl Default for KickTable {
    fn default() -> Self {
        Self {
            entries: vec![None; SLOTS],
        }
    }
}

fn slot(piece: Piece, from: Rotation, to: Rotation) -> usize {
    piece.index() * 16 + from.index() * 4 + to.index()
}

impl KickTable {
    /// Candidates for a transition, in the order they must be tried.
    #[inline]
    pub fn get(&self, piece: Piece, from: Rotation, to: Rotation) -> Option<&[(i8, i8)]> {
        self.entries[slot(piece, from, to)].as_deref()
    }

    /// Returns false (and keeps the old list) if the transition was already set.
    pub fn insert(&mut self, piece: Piece, from: Rotation, to: Rotation, kicks: KickList) -> bool {
        let entry = &mut self.entries[slot(piece, from, to)];
        if entry.is_some() {
            return false;
        }
        *entry = Some(kicks);
        true
    }

    /// Number of transitions with an entry.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
