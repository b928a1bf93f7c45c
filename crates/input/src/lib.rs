//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values. The
//! [`SoftDropLatch`] keeps the soft-drop flag consistent on terminals that
//! never report key releases by releasing it after a short idle timeout.

pub mod latch;
pub mod map;

pub use tui_blockfall_types as types;

pub use latch::SoftDropLatch;
pub use map::{is_soft_drop_key, map_key, should_quit};
