//! Grid tests - overlay, intersection and row clearing on small boards

use tui_blockfall::core::{Grid, Matrix, Tetromino};
use tui_blockfall::types::{PieceKind, Position, Tile};

fn codes(grid: &Grid) -> Vec<u8> {
    grid.tiles().iter().map(|t| t.as_u8()).collect()
}

fn row_codes(grid: &Grid, y: usize) -> Vec<u8> {
    grid.row(y).iter().map(|t| t.as_u8()).collect()
}

#[test]
fn test_overlay_o_piece_at_origin() {
    let board = Grid::new(5, 8);
    let piece = Tetromino::new(PieceKind::O);

    let out = board.overlay(&piece, Some(Position::ORIGIN));
    let mut expected = vec![0u8; 40];
    for idx in [0, 1, 5, 6] {
        expected[idx] = 4;
    }
    assert_eq!(codes(&out), expected);
}

#[test]
fn test_overlay_o_piece_at_offset() {
    let board = Grid::new(5, 8);
    let piece = Tetromino::new(PieceKind::O);

    let out = board.overlay(&piece, Some(Position::new(2, 1.0)));
    for y in 0..8 {
        let expected: Vec<u8> = if y == 1 || y == 2 {
            vec![0, 0, 4, 4, 0]
        } else {
            vec![0; 5]
        };
        assert_eq!(row_codes(&out, y), expected, "row {}", y);
    }
}

#[test]
fn test_overlay_defaults_to_piece_position() {
    let board = Grid::new(5, 8);
    let mut piece = Tetromino::new(PieceKind::O);
    piece.place_at(Position::new(3, 6.0));

    let out = board.overlay(&piece, None);
    assert_eq!(out.get(3, 6), Tile::Yellow);
    assert_eq!(out.get(4, 7), Tile::Yellow);
    assert_eq!(out.tiles().iter().filter(|t| t.is_filled()).count(), 4);
}

#[test]
fn test_overlay_does_not_mutate_operands() {
    let mut board = Grid::new(5, 8);
    board.set(0, 7, Tile::Red);
    let board_before = board.clone();
    let stamp = Grid::from_rows(&[[Tile::Green, Tile::Empty], [Tile::Green, Tile::Green]]);
    let stamp_before = stamp.clone();

    let out = board.overlay(&stamp, Some(Position::new(0, 6.0)));
    assert_eq!(board, board_before);
    assert_eq!(stamp, stamp_before);
    assert_eq!(out.get(0, 7), Tile::Green);
    assert_eq!(out.get(1, 7), Tile::Green);
}

#[test]
fn test_overlay_keeps_existing_tiles_under_empty_cells() {
    let mut board = Grid::new(3, 2);
    board.set(0, 0, Tile::Red);
    let stamp = Grid::from_rows(&[[Tile::Empty, Tile::Green]]);
    let out = board.overlay(&stamp, Some(Position::ORIGIN));
    assert_eq!(out.row(0), &[Tile::Red, Tile::Green, Tile::Empty]);
}

#[test]
fn test_line_clear_scenario() {
    use Tile::{Empty as E, Green as G, Red as R};
    let rows = [
        [E, E, E, E, E],
        [R, E, E, E, E],
        [E, G, E, E, E],
        [R, R, E, G, E],
        [E, G, G, G, G],
        [R, R, R, R, R],
        [G, G, G, G, G],
        [R, G, R, G, R],
    ];
    let mut grid = Grid::from_rows(&rows);

    assert_eq!(grid.full_rows(), vec![5, 6, 7]);
    grid.clear_rows(&[5, 6, 7]);

    let mut expected = vec![[E; 5]; 3];
    expected.extend_from_slice(&rows[..5]);
    assert_eq!(grid, Grid::from_rows(&expected));
    assert_eq!(grid.len(), 40);
    assert!(grid.full_rows().is_empty());
}

#[test]
fn test_full_rows_matches_row_predicate() {
    let mut grid = Grid::new(4, 6);
    for x in 0..4 {
        grid.set(x, 1, Tile::Orange);
        grid.set(x, 4, Tile::Orange);
    }
    grid.set(0, 2, Tile::Orange);

    let full = grid.full_rows();
    for y in 0..6 {
        let every = grid.row(y).iter().all(|t| t.is_filled());
        assert_eq!(full.contains(&y), every, "row {}", y);
    }
}

#[test]
fn test_intersects_with_board_tiles() {
    let mut board = Grid::new(5, 8);
    board.set(3, 4, Tile::Red);
    let piece = Tetromino::new(PieceKind::O);

    assert!(piece.intersects(&board, Some(Position::new(2, 3.0))));
    assert!(piece.intersects(&board, Some(Position::new(3, 4.0))));
    assert!(!piece.intersects(&board, Some(Position::new(0, 0.0))));
    // Unspawned piece with no explicit position never intersects.
    assert!(!piece.intersects(&board, None));
}

#[test]
fn test_in_bounds_of_board_edges() {
    let board = Grid::new(5, 8);
    let piece = Tetromino::new(PieceKind::O);
    assert!(piece.in_bounds_of(&board, Some(Position::new(3, 6.0))));
    assert!(!piece.in_bounds_of(&board, Some(Position::new(4, 6.0))));
    assert!(!piece.in_bounds_of(&board, Some(Position::new(3, 7.0))));
    assert!(!piece.in_bounds_of(&board, Some(Position::new(-1, 0.0))));
}
