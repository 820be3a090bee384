//! Finesse synthesis: the first key sequence that lands a piece on a target pose.

use sixres_core::{shortlex, Board, InputAction, KeySequence, Placement};
use tracing::warn;

use crate::config::MovementConfig;
use crate::geometry::Geometry;
use crate::movement::Simulator;

/// Keys for one placement, before the locking hard drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finesse {
    pub keys: KeySequence,
    /// Where the keys actually land the piece.
    pub placement: Placement,
    /// The target was unreachable and the piece is sonic-dropped from spawn instead.
    pub fallback: bool,
}

impl Finesse {
    /// Keys followed by `HardDrop`.
    pub fn inputs(&self) -> KeySequence {
        let mut keys = self.keys.clone();
        keys.push(InputAction::HardDrop);
        keys
    }
}

/// Search sequences shortest first, alphabet order within a length, and return
/// the first whose replay from spawn on `board` ends on `target`.
/// `hold` prefixes the result with `Hold`.
pub fn synthesize(
    geometry: &Geometry,
    board: &Board,
    target: &Placement,
    hold: bool,
    cfg: &MovementConfig,
) -> Option<KeySequence> {
    let mut sim = Simulator::spawn(geometry, board, target.piece, cfg.gravity)?;
    let origin = sim.snapshot();

    for seq in shortlex(cfg.actions.as_slice(), cfg.max_actions) {
        sim.restore(&origin);
        for &action in &seq {
            sim.apply(action);
        }
        if sim.terminal() == *target {
            return Some(with_hold(seq.into_iter().collect(), hold));
        }
    }
    None
}

fn with_hold(keys: KeySequence, hold: bool) -> KeySequence {
    if hold {
        keys.prefixed(InputAction::Hold)
    } else {
        keys
    }
}

/// [`synthesize`] with the sonic-drop fallback. `None` only on block-out.
pub fn finesse(
    geometry: &Geometry,
    board: &Board,
    target: &Placement,
    hold: bool,
    cfg: &MovementConfig,
) -> Option<Finesse> {
    if let Some(keys) = synthesize(geometry, board, target, hold, cfg) {
        return Some(Finesse {
            keys,
            placement: *target,
            fallback: false,
        });
    }

    let sim = Simulator::spawn(geometry, board, target.piece, cfg.gravity)?;
    let placement = sim.terminal();
    warn!(
        target: "sixres::finesse",
        target_pose = %target,
        landed = %placement,
        max_actions = cfg.max_actions,
        "target unreachable, using sonic drop"
    );
    Some(Finesse {
        keys: with_hold(KeySequence::new(), hold),
        placement,
        fallback: true,
    })
}
