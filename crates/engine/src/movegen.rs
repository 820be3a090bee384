//! Placement enumeration: every terminal pose reachable within K actions,
//! each with the first witnessing key sequence in shortlex order.

use std::collections::hash_map::Entry;
use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use sixres_core::{shortlex, Board, KeySequence, Piece, Placement, PoseKey};

use crate::config::MovementConfig;
use crate::geometry::Geometry;
use crate::movement::Simulator;

/// Terminal poses in discovery order, keyed by pose.
#[derive(Clone, Debug, Default)]
pub struct PlacementMap {
    entries: Vec<(Placement, KeySequence)>,
    index: FxHashMap<PoseKey, usize>,
}

impl PlacementMap {
    /// First writer wins.
    fn record(&mut self, placement: Placement, keys: impl FnOnce() -> KeySequence) {
        if let Entry::Vacant(slot) = self.index.entry(placement.key()) {
            slot.insert(self.entries.len());
            self.entries.push((placement, keys()));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Witness sequence for a pose, ignoring the piece kind.
    pub fn get(&self, placement: &Placement) -> Option<&KeySequence> {
        self.index
            .get(&placement.key())
            .map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, placement: &Placement) -> bool {
        self.index.contains_key(&placement.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Placement, KeySequence)> {
        self.entries.iter()
    }

    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        self.entries.iter().map(|(placement, _)| *placement)
    }
}

/// Breadth-first search over live states, expanding actions in alphabet order.
/// Visiting states in that order reports the same first witness per pose as
/// [`enumerate_exhaustive`].
pub fn enumerate(
    geometry: &Geometry,
    board: &Board,
    piece: Piece,
    cfg: &MovementConfig,
) -> PlacementMap {
    let mut map = PlacementMap::default();
    let Some(mut sim) = Simulator::spawn(geometry, board, piece, cfg.gravity) else {
        return map;
    };

    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    let start = sim.state();
    visited.insert(start.key());
    queue.push_back((start, KeySequence::new()));

    while let Some((state, keys)) = queue.pop_front() {
        sim.set_state(state);
        map.record(sim.terminal(), || keys.clone());
        if keys.len() >= cfg.max_actions {
            continue;
        }

        for &action in cfg.actions.iter() {
            sim.set_state(state);
            if !sim.apply(action) {
                continue;
            }
            let next = sim.state();
            if visited.insert(next.key()) {
                let mut next_keys = keys.clone();
                next_keys.push(action);
                queue.push_back((next, next_keys));
            }
        }
    }

    map
}

/// Replays every sequence of length `0..=K` from spawn, shortest first.
/// Slow; kept as the reference the BFS is checked against.
pub fn enumerate_exhaustive(
    geometry: &Geometry,
    board: &Board,
    piece: Piece,
    cfg: &MovementConfig,
) -> PlacementMap {
    let mut map = PlacementMap::default();
    let Some(mut sim) = Simulator::spawn(geometry, board, piece, cfg.gravity) else {
        return map;
    };
    let origin = sim.snapshot();

    for seq in shortlex(cfg.actions.as_slice(), cfg.max_actions) {
        sim.restore(&origin);
        for &action in &seq {
            sim.apply(action);
        }
        map.record(sim.terminal(), || seq.iter().copied().collect());
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use sixres_core::{InputAction, Rotation};

    fn enumerate_std(board: &Board, piece: Piece) -> PlacementMap {
        enumerate(
            Geometry::standard(),
            board,
            piece,
            &MovementConfig::default(),
        )
    }

    #[test]
    fn test_empty_sequence_first() {
        let map = enumerate_std(&Board::new(4, 20), Piece::T);
        let (first, keys) = map.iter().next().expect("non-empty");
        assert_eq!(*first, Placement::new(Piece::T, Rotation::North, 1, 0));
        assert!(keys.is_empty());
    }

    #[test]
    fn test_all_rotations_present() {
        let map = enumerate_std(&Board::new(10, 20), Piece::T);
        for rot in Rotation::ALL {
            assert!(map.placements().any(|p| p.rotation == rot));
        }
    }

    #[test]
    fn test_all_terminal_poses_rest() {
        let g = Geometry::standard();
        let board = Board::new(10, 20);
        for piece in Piece::ALL {
            for p in enumerate_std(&board, piece).placements() {
                let below = p.y - 1;
                assert!(crate::collision::collides(g, &board, p.piece, p.rotation, p.x, below));
            }
        }
    }

    #[test]
    fn test_o_on_narrow_board() {
        let map = enumerate_std(&Board::new(4, 20), Piece::O);
        let xs: Vec<i8> = map.placements().map(|p| p.x).collect();
        assert_eq!(xs, vec![1, 0, 2]);
        assert_eq!(
            map.get(&Placement::new(Piece::O, Rotation::North, 0, 0))
                .map(|k| k.as_slice()),
            Some(&[InputAction::MoveLeft][..])
        );
    }

    #[test]
    fn test_blocked_spawn_is_empty() {
        let board = Board::from_rows(4, 1, &["GGGG"; 5]).expect("valid rows");
        assert!(enumerate_std(&board, Piece::T).is_empty());
    }

    #[test]
    fn test_zero_budget_only_drop() {
        let cfg = MovementConfig {
            max_actions: 0,
            ..MovementConfig::default()
        };
        let map = enumerate(Geometry::standard(), &Board::new(4, 20), Piece::J, &cfg);
        assert_eq!(map.len(), 1);
    }
}
