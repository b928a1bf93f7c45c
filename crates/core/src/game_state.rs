//! Game state module - the session state machine
//!
//! `Game` ties the board, the falling piece, the bag, the lock delay and the
//! counters together. It never reads the clock: the caller reports elapsed
//! time through [`Game::tick`] and user intent through [`Game::apply`].

use crate::config::GameConfig;
use crate::grid::{Grid, Matrix};
use crate::lock_delay::{LockTimer, LockToken};
use crate::movement::{is_piece_obstructed, maybe_move, maybe_rotate};
use crate::piece::Tetromino;
use crate::rng::PieceBag;
use crate::scoring::{calculate_line_score, raise_gravity, LevelProgress};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, Direction, GameState, LockEvent, Position, Turn};

/// Complete game session
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    /// Locked tiles only; the falling piece is never part of it.
    board: Grid,
    current: Option<Tetromino>,
    next: Option<Tetromino>,
    bag: PieceBag,
    state: GameState,
    score: u32,
    progress: LevelProgress,
    lines: u32,
    /// Rows per second.
    gravity: f64,
    soft_drop: bool,
    lock_timer: LockTimer,
    last_event: Option<LockEvent>,
}

impl Game {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self::with_bag(config, PieceBag::new(seed))
    }

    /// Create a game drawing from an existing bag.
    pub fn with_bag(config: GameConfig, bag: PieceBag) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {:?}", config);
        Self {
            board: Grid::new(config.width, config.height),
            current: None,
            next: None,
            bag,
            state: GameState::Menu,
            score: 0,
            progress: LevelProgress::new(config.lines_per_level),
            lines: 0,
            gravity: config.starting_gravity,
            soft_drop: false,
            lock_timer: LockTimer::new(),
            last_event: None,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    /// Lines cleared since the last level-up.
    pub fn level_progress(&self) -> u32 {
        self.progress.progress()
    }

    /// Lines cleared this session.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn board(&self) -> &Grid {
        &self.board
    }

    pub fn current(&self) -> Option<&Tetromino> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Tetromino> {
        self.next.as_ref()
    }

    pub fn bag(&self) -> &PieceBag {
        &self.bag
    }

    pub fn lock_pending(&self) -> bool {
        self.lock_timer.is_pending()
    }

    /// Outcome of the most recent lock, consumed on read.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Begin a new session. Only acts from `Menu` or `GameOver`.
    pub fn start(&mut self) -> bool {
        if !matches!(self.state, GameState::Menu | GameState::GameOver) {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.lock_timer.cancel();
        self.board.clear();
        self.bag.shuffle();
        self.current = Some(self.bag.next_piece());
        self.next = Some(self.bag.next_piece());
        self.state = GameState::Running;
        self.score = 0;
        self.progress = LevelProgress::new(self.config.lines_per_level);
        self.lines = 0;
        self.gravity = self.config.starting_gravity;
        self.soft_drop = false;
        self.last_event = None;
    }

    /// Switch between `Running` and `Paused`.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            GameState::Running => {
                self.state = GameState::Paused;
                self.lock_timer.cancel();
                true
            }
            GameState::Paused => {
                self.state = GameState::Running;
                true
            }
            GameState::Menu | GameState::GameOver => false,
        }
    }

    /// Accepted in any state; only consulted while gravity runs.
    pub fn set_soft_drop(&mut self, held: bool) -> bool {
        let changed = self.soft_drop != held;
        self.soft_drop = held;
        changed
    }

    /// Whether the spawned current piece cannot move down.
    pub fn is_piece_landed(&self) -> bool {
        match &self.current {
            Some(piece) if piece.is_spawned() => {
                is_piece_obstructed(piece, &self.board, Direction::Down)
            }
            _ => false,
        }
    }

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Returns true if the piece spawned, moved or locked, or the game ended.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        // A spawn that overlaps the stack counts as landed; it still gets the
        // lock delay to slide free before topping out.
        let mut changed = false;
        if !piece.is_spawned() {
            piece.spawn(self.board.width());
            changed = true;
        }

        if self.is_piece_landed() {
            if !self.lock_timer.is_pending() {
                self.lock_timer.arm(self.config.lock_delay_ms);
                return changed;
            }
            if let Some(token) = self.lock_timer.advance(elapsed_ms) {
                return self.fire_lock(token) || changed;
            }
            return changed;
        }

        if self.lock_timer.is_pending() {
            self.lock_timer.cancel();
        }
        self.apply_gravity(elapsed_ms) || changed
    }

    /// Lock the piece for a fired deadline, if the deadline is still current
    /// and the piece is still resting on something.
    pub fn fire_lock(&mut self, token: LockToken) -> bool {
        if self.state != GameState::Running || !self.lock_timer.is_current(token) {
            return false;
        }
        if !self.is_piece_landed() {
            return false;
        }
        self.lock_piece();
        true
    }

    fn effective_gravity(&self) -> f64 {
        if self.soft_drop {
            self.gravity.max(self.config.soft_drop_gravity)
        } else {
            self.gravity
        }
    }

    fn apply_gravity(&mut self, elapsed_ms: u32) -> bool {
        let distance = self.effective_gravity() * elapsed_ms as f64 / 1000.0;
        let rows = (distance.floor() as usize).min(self.board.height());
        let remainder = distance.fract();

        let mut moved = false;
        for _ in 0..rows {
            if !self.move_piece(Direction::Down) {
                break;
            }
            moved = true;
        }

        // Sub-row progress is only kept while the row below is free, so the
        // floored row never overlaps anything.
        if remainder > 0.0 && !self.is_piece_landed() {
            if let Some(piece) = self.current.as_mut() {
                if let Some(pos) = piece.position() {
                    piece.set_position(Position::new(pos.x, pos.y + remainder));
                    moved = true;
                }
            }
        }
        moved
    }

    /// Dispatch one command; returns true if it had an effect.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece(Direction::Left),
            Command::MoveRight => self.move_piece(Direction::Right),
            Command::MoveDown => self.move_down(),
            Command::SoftDropOn => self.set_soft_drop(true),
            Command::SoftDropOff => self.set_soft_drop(false),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.rotate(Turn::Cw),
            Command::RotateCcw => self.rotate(Turn::Ccw),
            Command::PauseToggle => self.toggle_pause(),
            Command::Start => self.start(),
            Command::GravityUp => self.gravity_up(),
            Command::GravityDown => self.gravity_down(),
        }
    }

    /// Shift the piece one cell if the move is legal.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        match maybe_move(piece, &self.board, direction) {
            Some(pos) => {
                piece.set_position(pos);
                true
            }
            None => false,
        }
    }

    /// One row down, or lock right away if the piece already rests.
    pub fn move_down(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        if self.is_piece_landed() {
            self.lock_piece();
            return true;
        }
        self.move_piece(Direction::Down)
    }

    pub fn rotate(&mut self, turn: Turn) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        match maybe_rotate(piece, &self.board, turn) {
            Some((orientation, pos)) => {
                piece.set_orientation(orientation);
                piece.set_position(pos);
                true
            }
            None => false,
        }
    }

    /// Drop the piece as far as it goes and lock it.
    pub fn hard_drop(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        match &self.current {
            Some(piece) if piece.is_spawned() => {}
            _ => return false,
        }
        while self.move_piece(Direction::Down) {}
        self.lock_piece();
        true
    }

    /// Commit the current piece to the board.
    ///
    /// Returns false if there was nothing to lock or the piece topped out, in
    /// which case the game is over and the board is left untouched.
    pub fn lock_piece(&mut self) -> bool {
        self.lock_timer.cancel();
        let Some(piece) = self.current.as_ref() else {
            return false;
        };
        let Some(pos) = piece.position() else {
            return false;
        };

        if pos.y < 1.0 {
            self.end_game();
            return false;
        }

        self.board = self.board.overlay(piece, None);
        self.current = self.next.take();
        self.next = Some(self.bag.next_piece());

        let mut event = LockEvent::default();
        let full = self.board.full_rows();
        if !full.is_empty() {
            self.board.clear_rows(&full);
            let cleared = full.len() as u32;
            let awarded = calculate_line_score(full.len(), self.level());
            self.score = self.score.saturating_add(awarded);
            self.lines += cleared;

            let gained = self.progress.add_lines(cleared);
            if gained > 0 {
                self.gravity = raise_gravity(
                    self.gravity,
                    self.config.level_up_factor,
                    gained,
                    self.config.max_gravity(),
                );
            }

            event.lines_cleared = cleared;
            event.score_awarded = awarded;
            event.level_up = gained;
        }
        self.last_event = Some(event);
        true
    }

    fn end_game(&mut self) {
        self.lock_timer.cancel();
        self.state = GameState::GameOver;
        self.soft_drop = false;
        self.last_event = Some(LockEvent {
            top_out: true,
            ..LockEvent::default()
        });
    }

    /// Double gravity, up to the configured maximum.
    pub fn gravity_up(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let g = (self.gravity * 2.0).min(self.config.max_gravity());
        let changed = g != self.gravity;
        self.gravity = g;
        changed
    }

    /// Halve gravity, down to the starting value.
    pub fn gravity_down(&mut self) -> bool {
        if self.state != GameState::Running {
            return false;
        }
        let g = (self.gravity / 2.0).max(self.config.starting_gravity);
        let changed = g != self.gravity;
        self.gravity = g;
        changed
    }

    /// Board with the falling piece drawn in. The board itself is untouched.
    pub fn composed(&self) -> Grid {
        match &self.current {
            Some(piece) if piece.is_spawned() => self.board.overlay(piece, None),
            _ => self.board.clone(),
        }
    }

    /// Bitmap of the piece that will fall next.
    pub fn next_preview(&self) -> Option<&Grid> {
        self.next.as_ref().map(|p| p.grid())
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.playfield.clone_from(&self.board);
        if let Some(piece) = self.current.as_ref().filter(|p| p.is_spawned()) {
            out.playfield.paint(piece, None);
        }

        out.next_kind = self.next.as_ref().map(|p| p.kind());
        match self.next_preview() {
            Some(grid) => match out.next.as_mut() {
                Some(buf) => buf.clone_from(grid),
                None => out.next = Some(grid.clone()),
            },
            None => out.next = None,
        }

        out.state = self.state;
        out.score = self.score;
        out.level = self.level();
        out.level_progress = self.level_progress();
        out.lines = self.lines;
        out.gravity = self.gravity;
        out.soft_drop = self.soft_drop;
        out.lock_pending = self.lock_timer.is_pending();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}
