//! Property tests for the grid, the validator, the bag and the game loop.
//!
//! Generated boards, placements and command scripts check that:
//! - overlay never mutates its operands
//! - `full_rows` and `clear_rows` agree and preserve the grid size
//! - `maybe_move` only yields in-bounds, non-intersecting positions
//! - a bag shuffle is a permutation of the seven kinds
//! - no command/tick script can leave the falling piece overlapping the board

use proptest::prelude::*;
use tui_blockfall::core::{
    is_piece_obstructed, maybe_move, maybe_rotate, Game, GameConfig, Grid, Matrix, PieceBag,
    Tetromino,
};
use tui_blockfall::types::{Command, Direction, GameState, PieceKind, Position, Tile, Turn};

const W: usize = 8;
const H: usize = 12;

fn tile_strategy() -> impl Strategy<Value = Tile> {
    prop_oneof![
        3 => Just(Tile::Empty),
        1 => (1u8..=7).prop_map(|v| Tile::from_u8(v).unwrap_or(Tile::Red)),
    ]
}

fn grid_strategy(width: usize, height: usize) -> impl Strategy<Value = Grid> {
    prop::collection::vec(tile_strategy(), width * height)
        .prop_map(move |tiles| Grid::from_tiles(tiles, width, height))
}

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::from_index(i).unwrap_or(PieceKind::T))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Down)
    ]
}

fn command_strategy() -> impl Strategy<Value = Command> {
    (0usize..Command::ALL.len()).prop_map(|i| Command::ALL[i])
}

fn assert_piece_fits(game: &Game) {
    // Top-out leaves the piece where it was.
    if game.state() == GameState::GameOver {
        return;
    }
    if let Some(piece) = game.current().filter(|p| p.is_spawned()) {
        assert!(piece.in_bounds_of(game.board(), None));
        // Only a piece still in its spawn row may overlap the stack.
        let below_spawn_row = piece.position().map_or(false, |p| p.y >= 1.0);
        if below_spawn_row {
            assert!(!piece.intersects(game.board(), None));
        }
    }
}

proptest! {
    #[test]
    fn overlay_leaves_operands_untouched(
        base in grid_strategy(W, H),
        stamp in grid_strategy(3, 2),
        x in -3i32..10,
        y in -3.0f64..14.0,
    ) {
        let base_before = base.clone();
        let stamp_before = stamp.clone();
        let out = base.overlay(&stamp, Some(Position::new(x, y)));
        prop_assert_eq!(&base, &base_before);
        prop_assert_eq!(&stamp, &stamp_before);
        prop_assert_eq!(out.len(), base.len());
    }

    #[test]
    fn clearing_full_rows_keeps_the_rest_in_order(grid in grid_strategy(W, H)) {
        let full = grid.full_rows();
        for y in 0..H {
            let every = grid.row(y).iter().all(|t| t.is_filled());
            prop_assert_eq!(full.contains(&y), every);
        }

        let kept: Vec<Vec<Tile>> = (0..H)
            .filter(|y| !full.contains(y))
            .map(|y| grid.row(y).to_vec())
            .collect();

        let mut cleared = grid.clone();
        cleared.clear_rows(&full);
        prop_assert_eq!(cleared.len(), grid.len());
        for y in 0..full.len() {
            prop_assert!(cleared.row(y).iter().all(|t| t.is_empty()));
        }
        for (i, row) in kept.iter().enumerate() {
            prop_assert_eq!(cleared.row(full.len() + i), row.as_slice());
        }
    }

    #[test]
    fn maybe_move_only_yields_legal_positions(
        board in grid_strategy(W, H),
        kind in kind_strategy(),
        turns in 0usize..4,
        x in -2i32..10,
        y in 0.0f64..12.0,
        direction in direction_strategy(),
    ) {
        let mut piece = Tetromino::new(kind);
        for _ in 0..turns {
            piece.turn(Turn::Cw);
        }
        piece.place_at(Position::new(x, y));

        match maybe_move(&piece, &board, direction) {
            Some(pos) => {
                prop_assert!(piece.grid().in_bounds_of(&board, Some(pos)));
                prop_assert!(!piece.grid().intersects(&board, Some(pos)));
            }
            None => prop_assert!(is_piece_obstructed(&piece, &board, direction)),
        }
    }

    #[test]
    fn maybe_rotate_only_yields_legal_placements(
        board in grid_strategy(W, H),
        kind in kind_strategy(),
        x in 0i32..8,
        y in 0.0f64..12.0,
        cw in any::<bool>(),
    ) {
        let mut piece = Tetromino::new(kind);
        piece.place_at(Position::new(x, y));
        let turn = if cw { Turn::Cw } else { Turn::Ccw };

        if let Some((orientation, pos)) = maybe_rotate(&piece, &board, turn) {
            let grid = piece.grid_for(orientation);
            prop_assert!(grid.in_bounds_of(&board, Some(pos)));
            prop_assert!(!grid.intersects(&board, Some(pos)));
            prop_assert!(pos.x <= x);
            prop_assert_eq!(pos.y, y);
        }
    }

    #[test]
    fn shuffle_is_a_permutation(seed in any::<u32>(), draws in 0usize..20) {
        let mut bag = PieceBag::new(seed);
        for _ in 0..draws {
            bag.next_kind();
        }
        bag.shuffle();

        let mut seen: Vec<usize> = bag.bag().iter().map(|k| k.index()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..7).collect::<Vec<_>>());
        prop_assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn scripted_play_never_overlaps_the_board(
        seed in any::<u32>(),
        script in prop::collection::vec((command_strategy(), 0u32..200), 1..120),
    ) {
        let mut game = Game::new(GameConfig::default().with_board(W, H), seed);
        game.apply(Command::Start);

        for (command, elapsed_ms) in script {
            game.apply(command);
            assert_piece_fits(&game);
            game.tick(elapsed_ms);
            assert_piece_fits(&game);

            prop_assert!(game.gravity() >= game.config().starting_gravity);
            prop_assert!(game.gravity() <= game.config().max_gravity());
            if game.state() == GameState::GameOver {
                prop_assert!(game.apply(Command::Start));
            }
        }
    }
}
