//! sixres-engine - geometry, movement and placement search.
//!
//! Provides the text-loaded shape and kick tables, the movement simulator,
//! the placement enumerator and the finesse synthesizer.

pub mod apply;
pub mod collision;
pub mod config;
pub mod error;
pub mod finesse;
pub mod geometry;
pub mod kicks;
pub mod movegen;
pub mod movement;

pub use apply::{apply_placement, fills_only_empty, is_grounded};
pub use collision::{can_place, collides, hard_drop_y};
pub use config::{ActionSet, Gravity, MovementConfig};
pub use error::GeometryError;
pub use finesse::{finesse, synthesize, Finesse};
pub use geometry::{Geometry, SHAPES, SRS_PLUS_KICKS};
pub use kicks::KickTable;
pub use movegen::{enumerate, enumerate_exhaustive, PlacementMap};
pub use movement::{PlacementState, Simulator, Snapshot};
