//! Piece module - tetrominoes with all four orientations precomputed
//!
//! A piece is built from the boolean occupancy matrix of its North orientation.
//! The matrix is rotated clockwise (transpose, then reverse every row) three
//! times to produce East, South and West, and each orientation is stored as its
//! own [`Grid`]. Non-square shapes swap width and height between North/South
//! and East/West.

use arrayvec::ArrayVec;

use crate::grid::{Grid, Matrix};
use crate::types::{Orientation, PieceKind, Position, Tile, Turn};

/// Largest bounding box side of a shape.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Boolean occupancy matrix, row by row.
type ShapeMatrix = ArrayVec<ArrayVec<bool, MAX_SHAPE_SIDE>, MAX_SHAPE_SIDE>;

/// Whether a piece has been put on the board yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Placement {
    #[default]
    NotSpawned,
    Active(Position),
}

/// A falling piece: identity, orientation, placement and its four bitmaps.
#[derive(Debug, Clone, PartialEq)]
pub struct Tetromino {
    kind: PieceKind,
    tile: Tile,
    orientation: Orientation,
    placement: Placement,
    /// Indexed by `Orientation::index`.
    grids: [Grid; 4],
}

impl Tetromino {
    /// Create an unspawned piece of the given kind in North orientation
    pub fn new(kind: PieceKind) -> Self {
        Self::from_matrix(kind, kind.north_matrix(), kind.tile())
    }

    /// Build a piece from an arbitrary North occupancy matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged, or larger than
    /// [`MAX_SHAPE_SIDE`] on either side.
    pub fn from_matrix<R: AsRef<[bool]>>(kind: PieceKind, north: &[R], tile: Tile) -> Self {
        assert!(
            !north.is_empty() && north.len() <= MAX_SHAPE_SIDE,
            "shape must have 1..={} rows",
            MAX_SHAPE_SIDE
        );
        let mut m = ShapeMatrix::new();
        for row in north {
            let row = row.as_ref();
            assert!(
                !row.is_empty() && row.len() <= MAX_SHAPE_SIDE,
                "shape rows must have 1..={} cells",
                MAX_SHAPE_SIDE
            );
            m.push(row.iter().copied().collect());
        }
        assert!(m.iter().all(|r| r.len() == m[0].len()), "ragged shape rows");

        let east = rotate_cw(&m);
        let south = rotate_cw(&east);
        let west = rotate_cw(&south);

        Self {
            kind,
            tile,
            orientation: Orientation::North,
            placement: Placement::NotSpawned,
            grids: [
                to_grid(&m, tile),
                to_grid(&east, tile),
                to_grid(&south, tile),
                to_grid(&west, tile),
            ],
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn tile(&self) -> Tile {
        self.tile
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn position(&self) -> Option<Position> {
        match self.placement {
            Placement::NotSpawned => None,
            Placement::Active(pos) => Some(pos),
        }
    }

    pub fn is_spawned(&self) -> bool {
        matches!(self.placement, Placement::Active(_))
    }

    /// Bitmap of the current orientation.
    pub fn grid(&self) -> &Grid {
        self.grid_for(self.orientation)
    }

    pub fn grid_for(&self, orientation: Orientation) -> &Grid {
        &self.grids[orientation.index()]
    }

    /// Orientation after a quarter turn. Does not change the piece.
    pub fn rotation(&self, turn: Turn) -> Orientation {
        self.orientation.rotated(turn)
    }

    /// Where this piece enters a board of the given width.
    pub fn spawn_position(&self, board_width: usize) -> Position {
        let x = (board_width as f64 / 2.0 - self.width() as f64 / 2.0).floor() as i32;
        Position::new(x, 0.0)
    }

    /// Put the piece on the board at its spawn position.
    pub fn spawn(&mut self, board_width: usize) -> Position {
        let pos = self.spawn_position(board_width);
        self.placement = Placement::Active(pos);
        pos
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.placement = Placement::Active(position);
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Rotate without any legality check, for building fixtures.
    pub fn turn(&mut self, turn: Turn) {
        self.orientation = self.rotation(turn);
    }

    /// Place the piece without any legality check, for building fixtures.
    pub fn place_at(&mut self, position: Position) {
        self.placement = Placement::Active(position);
    }
}

impl Matrix for Tetromino {
    fn width(&self) -> usize {
        self.grid().width()
    }

    fn height(&self) -> usize {
        self.grid().height()
    }

    fn get(&self, x: usize, y: usize) -> Tile {
        self.grid().get(x, y)
    }

    fn anchor(&self) -> Option<Position> {
        self.position()
    }

    fn overlay(&self, other: &dyn Matrix, position: Option<Position>) -> Grid {
        self.grid().overlay(other, position)
    }

    fn intersects(&self, other: &dyn Matrix, position: Option<Position>) -> bool {
        match position.or_else(|| self.position()) {
            Some(pos) => self.grid().intersects(other, Some(pos)),
            None => false,
        }
    }

    fn in_bounds_of(&self, other: &dyn Matrix, position: Option<Position>) -> bool {
        self.grid().in_bounds_of(other, position.or_else(|| self.position()))
    }
}

/// Quarter turn clockwise: transpose, then reverse every row.
fn rotate_cw(m: &ShapeMatrix) -> ShapeMatrix {
    let rows = m.len();
    let cols = m[0].len();
    (0..cols)
        .map(|c| (0..rows).rev().map(|r| m[r][c]).collect())
        .collect()
}

fn to_grid(m: &ShapeMatrix, tile: Tile) -> Grid {
    let height = m.len();
    let width = m[0].len();
    let tiles = m
        .iter()
        .flat_map(|row| row.iter().map(|&filled| if filled { tile } else { Tile::Empty }))
        .collect();
    Grid::from_tiles(tiles, width, height)
}
