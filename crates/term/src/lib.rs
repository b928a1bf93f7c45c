//! Terminal front-end for the falling-block game.
//!
//! A small, game-oriented rendering layer: [`GameView`] turns a
//! [`core::GameSnapshot`] into a framebuffer without any I/O, and
//! [`TerminalRenderer`] flushes framebuffers through crossterm.
//! [`FrameTimes`] smooths the elapsed time the driver loop feeds the game.

pub mod fb;
pub mod frame_times;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frame_times::FrameTimes;
pub use game_view::{tile_color, GameView, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
