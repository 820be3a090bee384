//! collision detection - walls, floor, other blocks

use sixres_core::{Board, Piece, Rotation};

use crate::geometry::Geometry;

/// does piece collide with anything?
/// Space above the top row is free; walls and floor are not.
#[inline]
pub fn collides(
    geometry: &Geometry,
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
) -> bool {
    geometry
        .cells(piece, rotation)
        .iter()
        .any(|&(dx, dy)| board.is_occupied(x as i32 + dx as i32, y as i32 + dy as i32))
}

/// can we place here? (just !collides)
pub fn can_place(
    geometry: &Geometry,
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
) -> bool {
    !collides(geometry, board, piece, rotation, x, y)
}

/// Lowest y reachable by dropping straight down from a non-colliding pose.
#[inline]
pub fn hard_drop_y(
    geometry: &Geometry,
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
) -> i8 {
    let mut landing_y = y;
    while !collides(geometry, board, piece, rotation, x, landing_y - 1) {
        landing_y -= 1;
    }
    landing_y
}
