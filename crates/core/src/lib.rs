//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every gameplay rule of the falling-block game. It has
//! **no dependencies** on the terminal, the clock or any I/O, which makes it:
//!
//! - **Deterministic**: the same seed and the same tick/command sequence give
//!   the same game
//! - **Testable**: every rule is exercised by plain unit tests
//! - **Portable**: the terminal front-end is just one possible driver
//!
//! # Module Structure
//!
//! - [`grid`]: row-major tile buffers and the [`Matrix`] queries shared with pieces
//! - [`piece`]: tetromino shapes with four precomputed orientations
//! - [`movement`]: legality checks for moves and rotations
//! - [`rng`]: seeded 7-bag randomizer
//! - [`lock_delay`]: cancellable lock deadline with stale-token detection
//! - [`scoring`]: line-clear points and level progression
//! - [`config`]: board size and tuning values
//! - [`game_state`]: the [`Game`] session state machine
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! - **7-Bag Randomizer**: every seven consecutive draws are a permutation
//!   of the seven kinds
//! - **Rotation**: plain quarter turns; a shape that would poke through the
//!   right wall is nudged left, there is no kick table
//! - **Lock Delay**: 500ms once a piece rests on something; moving it off its
//!   support cancels the deadline
//! - **Top-out**: a piece that locks above row 1 ends the game
//! - **Scoring**: 40/100/300/1200 times `level + 1`; gravity doubles every
//!   ten lines
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::{Game, GameConfig};
//! use tui_blockfall_core::types::{Command, GameState};
//!
//! let mut game = Game::new(GameConfig::default(), 12345);
//! game.apply(Command::Start);
//!
//! // The first tick puts the piece on the board
//! game.tick(16);
//! game.apply(Command::MoveRight);
//! game.apply(Command::HardDrop);
//!
//! assert_eq!(game.state(), GameState::Running);
//! assert!(game.board().tiles().iter().any(|t| t.is_filled()));
//! ```
//!
//! # Timing
//!
//! Gravity is measured in rows per second and integrated over the elapsed
//! time passed to [`Game::tick`], so the driver may tick at any rate. Partial
//! rows accumulate in the piece's fractional `y`.

pub mod config;
pub mod game_state;
pub mod grid;
pub mod lock_delay;
pub mod movement;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use game_state::Game;
pub use grid::{Grid, Matrix};
pub use lock_delay::{LockTimer, LockToken};
pub use movement::{is_piece_obstructed, maybe_move, maybe_rotate};
pub use piece::{Placement, Tetromino};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_line_score, LevelProgress};
pub use snapshot::GameSnapshot;
