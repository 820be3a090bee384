//! Movement simulator: one live piece on a private board copy.
//! Every action either applies completely or leaves the pose untouched.

use sixres_core::{Board, Cell, InputAction, Piece, Placement, PoseKey, Rotation};

use crate::collision::{collides, hard_drop_y};
use crate::config::Gravity;
use crate::geometry::Geometry;

/// Live pose of the simulated piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacementState {
    pub x: i8,
    pub y: i8,
    pub rotation: Rotation,
}

impl PlacementState {
    #[inline]
    pub fn key(&self) -> PoseKey {
        PoseKey::new(self.x, self.y, self.rotation)
    }
}

/// Pose and board contents, restorable with [`Simulator::restore`].
#[derive(Clone, Debug)]
pub struct Snapshot {
    state: PlacementState,
    board: Board,
}

pub struct Simulator<'g> {
    geometry: &'g Geometry,
    board: Board,
    piece: Piece,
    state: PlacementState,
    gravity: Gravity,
}

impl<'g> Simulator<'g> {
    /// Spawn at `x = (width - 1) / 2`, `y = visible_height`, facing north.
    /// Returns `None` on block-out.
    pub fn spawn(
        geometry: &'g Geometry,
        board: &Board,
        piece: Piece,
        gravity: Gravity,
    ) -> Option<Self> {
        let state = PlacementState {
            x: ((board.width() - 1) / 2) as i8,
            y: board.visible_height() as i8,
            rotation: Rotation::North,
        };
        let mut sim = Self {
            geometry,
            board: board.clone(),
            piece,
            state,
            gravity,
        };
        if sim.collides() {
            return None;
        }
        sim.settle();
        Some(sim)
    }

    #[inline]
    fn fits(&self, state: PlacementState) -> bool {
        !collides(
            self.geometry,
            &self.board,
            self.piece,
            state.rotation,
            state.x,
            state.y,
        )
    }

    fn settle(&mut self) {
        if self.gravity == Gravity::Instant {
            self.sonic_drop();
        }
    }

    /// Shift by `dx`; reverted if the result collides.
    pub fn translate(&mut self, dx: i8) -> bool {
        let next = PlacementState {
            x: self.state.x + dx,
            ..self.state
        };
        if !self.fits(next) {
            return false;
        }
        self.state = next;
        true
    }

    /// Drop to the lowest free y. A second call is a no-op.
    pub fn sonic_drop(&mut self) -> bool {
        let y = self.landing_y();
        let moved = y != self.state.y;
        self.state.y = y;
        moved
    }

    fn landing_y(&self) -> i8 {
        hard_drop_y(
            self.geometry,
            &self.board,
            self.piece,
            self.state.rotation,
            self.state.x,
            self.state.y,
        )
    }

    /// Rotate by `delta` quarter turns, trying kick candidates in table order.
    /// No table entry means the rotation is impossible.
    pub fn rotate(&mut self, delta: i8) -> bool {
        let from = self.state.rotation;
        let to = from.rotate(delta);
        let Some(kicks) = self.geometry.kicks(self.piece, from, to) else {
            return false;
        };
        for &(dx, dy) in kicks {
            let candidate = PlacementState {
                x: self.state.x + dx,
                y: self.state.y + dy,
                rotation: to,
            };
            if self.fits(candidate) {
                self.state = candidate;
                return true;
            }
        }
        false
    }

    pub fn collides(&self) -> bool {
        !self.fits(self.state)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            board: self.board.clone(),
        }
    }

    /// Undo everything since `snapshot`, including a commit.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.state = snapshot.state;
        self.board.clone_from(&snapshot.board);
    }

    /// Write the current pose into the board. Cells above the top are dropped.
    pub fn commit(&mut self) {
        let pose = self.pose();
        let (width, height) = (self.board.width() as i32, self.board.height() as i32);
        for (x, y) in self.geometry.placed_cells(&pose) {
            if (0..width).contains(&x) && (0..height).contains(&y) {
                self.board.set(x as usize, y as usize, Cell::Piece(self.piece));
            }
        }
    }

    /// Perform one input. Returns whether the pose changed.
    pub fn apply(&mut self, action: InputAction) -> bool {
        let moved = match action {
            InputAction::MoveLeft => self.translate(-1),
            InputAction::MoveRight => self.translate(1),
            InputAction::RotateCW => self.rotate(1),
            InputAction::RotateCCW => self.rotate(-1),
            InputAction::Rotate180 => self.rotate(2),
            InputAction::SonicDrop | InputAction::HardDrop => self.sonic_drop(),
            InputAction::Hold => false,
            InputAction::DasLeft => self.slide(-1),
            InputAction::DasRight => self.slide(1),
        };
        if moved {
            self.settle();
        }
        moved
    }

    fn slide(&mut self, dx: i8) -> bool {
        let mut moved = false;
        while self.translate(dx) {
            moved = true;
        }
        moved
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Teleport to `state`; only for callers replaying states they already validated.
    pub(crate) fn set_state(&mut self, state: PlacementState) {
        self.state = state;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current pose, not dropped.
    pub fn pose(&self) -> Placement {
        Placement::new(self.piece, self.state.rotation, self.state.x, self.state.y)
    }

    /// Pose after the implicit lock drop.
    pub fn terminal(&self) -> Placement {
        Placement::new(
            self.piece,
            self.state.rotation,
            self.state.x,
            self.landing_y(),
        )
    }
}
