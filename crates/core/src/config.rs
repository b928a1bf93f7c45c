//! Game configuration - board size and tuning values
//!
//! Defaults come from the constants in the types crate. Board dimensions are
//! the only value a front-end is expected to change; the rest exist so tests
//! can drive the rules with round numbers.

use std::fmt;

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, FRAMES_PER_SECOND, LEVEL_UP_GRAVITY_FACTOR, LINES_PER_LEVEL,
    LOCK_DELAY_MS, SOFT_DROP_GRAVITY, STARTING_GRAVITY,
};

/// Smallest board that still fits every piece in every orientation.
pub const MIN_BOARD_SIDE: usize = 4;

/// Largest board side a terminal front-end can lay out.
pub const MAX_BOARD_SIDE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub lock_delay_ms: u32,
    /// Rows per second at level 1.
    pub starting_gravity: f64,
    /// Minimum rows per second while soft drop is held.
    pub soft_drop_gravity: f64,
    pub lines_per_level: u32,
    pub level_up_factor: f64,
    /// Nominal tick rate; bounds gravity to one board height per tick.
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            lock_delay_ms: LOCK_DELAY_MS,
            starting_gravity: STARTING_GRAVITY,
            soft_drop_gravity: SOFT_DROP_GRAVITY,
            lines_per_level: LINES_PER_LEVEL,
            level_up_factor: LEVEL_UP_GRAVITY_FACTOR,
            ticks_per_second: FRAMES_PER_SECOND,
        }
    }
}

impl GameConfig {
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_lock_delay_ms(mut self, lock_delay_ms: u32) -> Self {
        self.lock_delay_ms = lock_delay_ms;
        self
    }

    pub fn with_starting_gravity(mut self, gravity: f64) -> Self {
        self.starting_gravity = gravity;
        self
    }

    pub fn with_soft_drop_gravity(mut self, gravity: f64) -> Self {
        self.soft_drop_gravity = gravity;
        self
    }

    pub fn with_lines_per_level(mut self, lines: u32) -> Self {
        self.lines_per_level = lines;
        self
    }

    /// Fastest allowed gravity: one full board height per nominal tick.
    pub fn max_gravity(&self) -> f64 {
        self.height as f64 * self.ticks_per_second as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_SIDE || self.height < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_BOARD_SIDE || self.height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !self.starting_gravity.is_finite() || self.starting_gravity <= 0.0 {
            return Err(ConfigError::InvalidGravity(self.starting_gravity));
        }
        if !self.soft_drop_gravity.is_finite() || self.soft_drop_gravity <= 0.0 {
            return Err(ConfigError::InvalidGravity(self.soft_drop_gravity));
        }
        if self.starting_gravity > self.max_gravity() {
            return Err(ConfigError::InvalidGravity(self.starting_gravity));
        }
        if !self.level_up_factor.is_finite() || self.level_up_factor < 1.0 {
            return Err(ConfigError::InvalidLevelUpFactor(self.level_up_factor));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    BoardTooSmall { width: usize, height: usize },
    BoardTooLarge { width: usize, height: usize },
    InvalidGravity(f64),
    /// Gravity may never decrease on a level-up.
    InvalidLevelUpFactor(f64),
    ZeroLinesPerLevel,
    ZeroTickRate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall { width, height } => write!(
                f,
                "board {}x{} is too small (minimum {}x{})",
                width, height, MIN_BOARD_SIDE, MIN_BOARD_SIDE
            ),
            ConfigError::BoardTooLarge { width, height } => write!(
                f,
                "board {}x{} is too large (maximum {}x{})",
                width, height, MAX_BOARD_SIDE, MAX_BOARD_SIDE
            ),
            ConfigError::InvalidGravity(g) => write!(f, "invalid gravity {}", g),
            ConfigError::InvalidLevelUpFactor(k) => {
                write!(f, "level-up factor {} must be at least 1", k)
            }
            ConfigError::ZeroLinesPerLevel => write!(f, "lines per level must be at least 1"),
            ConfigError::ZeroTickRate => write!(f, "tick rate must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
