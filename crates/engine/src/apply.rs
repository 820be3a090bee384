use sixres_core::{Board, Cell, Placement};

use crate::geometry::Geometry;

/// Apply a placement to a board and return the resulting board and lines cleared.
pub fn apply_placement(geometry: &Geometry, board: &Board, placement: &Placement) -> (Board, u8) {
    let mut next = board.clone();
    let (width, height) = (board.width() as i32, board.height() as i32);

    for (x, y) in geometry.placed_cells(placement) {
        // cells above the top are lost
        if x >= 0 && y >= 0 && x < width && y < height {
            next.set(x as usize, y as usize, Cell::Piece(placement.piece));
        }
    }

    let lines = next.clear_lines();
    (next, lines)
}

/// Some cell rests on the floor or on a filled cell of the pre-placement board.
pub fn is_grounded(geometry: &Geometry, board: &Board, placement: &Placement) -> bool {
    geometry
        .placed_cells(placement)
        .any(|(x, y)| board.is_occupied(x, y - 1))
}

/// Every cell is inside the walls and currently empty.
pub fn fills_only_empty(geometry: &Geometry, board: &Board, placement: &Placement) -> bool {
    geometry
        .placed_cells(placement)
        .all(|(x, y)| !board.is_occupied(x, y))
}
