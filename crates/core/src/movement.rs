//! Movement module - legality checks for translations and rotations
//!
//! These are pure functions: they never touch the piece or the board, they
//! only answer whether a proposed change is legal and what the resulting
//! placement would be. A piece that has not been spawned is never movable.

use crate::grid::{Grid, Matrix};
use crate::piece::Tetromino;
use crate::types::{Direction, Orientation, Position, Turn};

/// Candidate position one cell away in `direction`, if it is legal.
pub fn maybe_move(piece: &Tetromino, board: &Grid, direction: Direction) -> Option<Position> {
    let pos = piece.position()?;
    let candidate = match direction {
        Direction::Left => pos.shifted(-1, 0),
        Direction::Right => pos.shifted(1, 0),
        Direction::Down => pos.shifted(0, 1),
    };

    let grid = piece.grid();
    if grid.in_bounds_of(board, Some(candidate)) && !grid.intersects(board, Some(candidate)) {
        Some(candidate)
    } else {
        None
    }
}

/// Candidate orientation and position after a quarter turn, if legal.
///
/// A rotated shape that would stick out past the right wall is nudged left
/// just enough to fit. There is no vertical adjustment and no kick table.
pub fn maybe_rotate(piece: &Tetromino, board: &Grid, turn: Turn) -> Option<(Orientation, Position)> {
    let pos = piece.position()?;
    let orientation = piece.rotation(turn);
    let grid = piece.grid_for(orientation);

    let max_x = board.width() as i32 - grid.width() as i32;
    let candidate = Position::new(pos.x.min(max_x), pos.y);

    if grid.in_bounds_of(board, Some(candidate)) && !grid.intersects(board, Some(candidate)) {
        Some((orientation, candidate))
    } else {
        None
    }
}

/// Whether the piece cannot move one cell in `direction`.
pub fn is_piece_obstructed(piece: &Tetromino, board: &Grid, direction: Direction) -> bool {
    maybe_move(piece, board, direction).is_none()
}
