//! Grid module - row-major tile buffers and the shared `Matrix` queries
//!
//! A [`Grid`] is used both for the board (locked tiles) and for every
//! orientation bitmap of a piece. Storage is a flat `Vec<Tile>` in row-major
//! order (`y * width + x`) so that row scans and row moves are contiguous
//! slice operations.
//!
//! Coordinates: (x, y) where x grows to the right and y grows downwards;
//! row 0 is the top of the board.

use crate::types::{Position, Tile};

/// Capability set shared by plain grids and pieces.
///
/// The validator and the overlay logic only talk to this trait, so they do not
/// care whether they hold a board or a piece in some orientation.
pub trait Matrix {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Tile at `(x, y)`. Callers must stay within `width() x height()`.
    fn get(&self, x: usize, y: usize) -> Tile;

    /// Offset used when an operation is called without an explicit position.
    fn anchor(&self) -> Option<Position> {
        None
    }

    /// Copy of `self` with every non-empty cell of `other` written on top.
    ///
    /// The offset is `position`, else `other`'s anchor, else the origin. The
    /// vertical offset is floored; cells that land outside `self` are skipped.
    fn overlay(&self, other: &dyn Matrix, position: Option<Position>) -> Grid {
        let mut out = Grid::copy_of(self);
        out.paint(other, position);
        out
    }

    /// Whether any non-empty cell of `self`, placed at `position`, meets a
    /// non-empty cell of `other`.
    ///
    /// Cells of `self` that fall outside `other` count as blocked.
    fn intersects(&self, other: &dyn Matrix, position: Option<Position>) -> bool {
        let pos = position.or_else(|| self.anchor()).unwrap_or_default();
        let x0 = pos.x as i64;
        let y0 = pos.row() as i64;
        let (ow, oh) = (other.width() as i64, other.height() as i64);

        for i in 0..self.height() {
            for j in 0..self.width() {
                if self.get(j, i).is_empty() {
                    continue;
                }
                let ox = x0 + j as i64;
                let oy = y0 + i as i64;
                if ox < 0 || oy < 0 || ox >= ow || oy >= oh {
                    return true;
                }
                if other.get(ox as usize, oy as usize).is_filled() {
                    return true;
                }
            }
        }
        false
    }

    /// Whether `self`, placed at `position`, lies entirely inside `other`.
    fn in_bounds_of(&self, other: &dyn Matrix, position: Option<Position>) -> bool {
        let pos = position.or_else(|| self.anchor()).unwrap_or_default();
        let max_x = other.width() as i64 - self.width() as i64;
        let max_row = other.height() as i64 - self.height() as i64;
        pos.x >= 0 && pos.y >= 0.0 && (pos.x as i64) <= max_x && (pos.row() as i64) <= max_row
    }
}

/// Fixed-size row-major tile buffer.
///
/// Invariant: `tiles.len() == width * height`. Dimensions never change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            tiles: vec![Tile::Empty; width * height],
            width,
            height,
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `tiles.len() != width * height`.
    pub fn from_tiles(tiles: Vec<Tile>, width: usize, height: usize) -> Self {
        assert_eq!(
            tiles.len(),
            width * height,
            "grid buffer of {} tiles does not match {}x{}",
            tiles.len(),
            width,
            height
        );
        Self {
            tiles,
            width,
            height,
        }
    }

    /// Build from rows of equal length.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), width, "ragged grid rows");
            tiles.extend_from_slice(row);
        }
        Self::from_tiles(tiles, width, height)
    }

    /// Materialise any matrix into a standalone grid.
    pub fn copy_of(m: &(impl Matrix + ?Sized)) -> Self {
        let (width, height) = (m.width(), m.height());
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                tiles.push(m.get(x, y));
            }
        }
        Self {
            tiles,
            width,
            height,
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// One row as a slice.
    pub fn row(&self, y: usize) -> &[Tile] {
        let start = y * self.width;
        &self.tiles[start..start + self.width]
    }

    /// Bounds-checked lookup; `None` outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.tiles[y as usize * self.width + x as usize])
    }

    /// Set the tile at `(x, y)`. Same precondition as [`Matrix::get`].
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let idx = self.index(x, y);
        self.tiles[idx] = tile;
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.tiles.fill(Tile::Empty);
    }

    /// In-place form of [`Matrix::overlay`], for reusing a buffer.
    pub fn paint(&mut self, other: &(impl Matrix + ?Sized), position: Option<Position>) {
        let pos = position.or_else(|| other.anchor()).unwrap_or_default();
        let (x0, y0) = (pos.x, pos.row());
        for y in 0..other.height() {
            let ty = y0 as i64 + y as i64;
            if ty < 0 {
                continue;
            }
            if ty >= self.height as i64 {
                break;
            }
            for x in 0..other.width() {
                let tx = x0 as i64 + x as i64;
                if tx < 0 {
                    continue;
                }
                if tx >= self.width as i64 {
                    break;
                }
                let t = other.get(x, y);
                if t.is_filled() {
                    let idx = ty as usize * self.width + tx as usize;
                    self.tiles[idx] = t;
                }
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|t| t.is_filled())
    }

    /// Indices (ascending) of every completely filled row.
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows and pad the top with empty rows.
    ///
    /// Indices refer to the layout before removal; duplicates and out-of-range
    /// indices are ignored. Remaining rows keep their relative order.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        let width = self.width;
        let mut write_y = self.height;

        // Scan from bottom to top, compacting kept rows downwards.
        for read_y in (0..self.height).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.tiles.copy_within(src..src + width, write_y * width);
            }
        }

        self.tiles[..write_y * width].fill(Tile::Empty);
    }
}

impl Matrix for Grid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.index(x, y)]
    }
}
