//! Scoring module - line-clear points and level progression
//!
//! Points follow the classic table (40/100/300/1200) multiplied by
//! `level + 1`. Levels start at 1; every `lines_per_level` cleared lines bump
//! the level and speed gravity up by a constant factor.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows at once at `level`.
///
/// Anything outside 1..=4 lines scores nothing.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level.saturating_add(1))
}

/// Level counters for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    level: u32,
    /// Lines cleared since the last level-up.
    progress: u32,
    lines_per_level: u32,
}

impl LevelProgress {
    pub fn new(lines_per_level: u32) -> Self {
        Self {
            level: 1,
            progress: 0,
            lines_per_level: lines_per_level.max(1),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Record cleared lines; returns how many levels were gained.
    ///
    /// Overflow past the threshold carries into the next level.
    pub fn add_lines(&mut self, lines: u32) -> u32 {
        self.progress += lines;
        let mut gained = 0;
        while self.progress >= self.lines_per_level {
            self.progress -= self.lines_per_level;
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

/// Gravity after `levels` level-ups, never above `max`.
pub fn raise_gravity(gravity: f64, factor: f64, levels: u32, max: f64) -> f64 {
    let mut g = gravity;
    for _ in 0..levels {
        g *= factor;
    }
    g.min(max)
}
