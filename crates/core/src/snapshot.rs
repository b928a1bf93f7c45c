//! Snapshot module - read-only view of a game for renderers and tests

use crate::grid::Grid;
use crate::types::{GameState, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Board with the falling piece drawn in, if it has spawned.
    pub playfield: Grid,
    pub next_kind: Option<PieceKind>,
    /// North-facing bitmap of the next piece.
    pub next: Option<Grid>,
    pub state: GameState,
    pub score: u32,
    pub level: u32,
    pub level_progress: u32,
    pub lines: u32,
    /// Rows per second.
    pub gravity: f64,
    pub soft_drop: bool,
    pub lock_pending: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.playfield.clear();
        self.next_kind = None;
        self.next = None;
        self.state = GameState::Menu;
        self.score = 0;
        self.level = 0;
        self.level_progress = 0;
        self.lines = 0;
        self.gravity = 0.0;
        self.soft_drop = false;
        self.lock_pending = false;
    }

    pub fn playable(&self) -> bool {
        self.state == GameState::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            playfield: Grid::new(BOARD_WIDTH, BOARD_HEIGHT),
            next_kind: None,
            next: None,
            state: GameState::Menu,
            score: 0,
            level: 0,
            level_progress: 0,
            lines: 0,
            gravity: 0.0,
            soft_drop: false,
            lock_pending: false,
        }
    }
}
