//! Rolling mean of recent frame durations.
//!
//! The driver loop sleeps in `poll` for roughly one tick, but wakes early on
//! input and late under load. Feeding the game the mean of the last few frame
//! times instead of the raw measurement keeps gravity steady.

use crate::types::FRAME_TIME_SAMPLES;

#[derive(Debug, Clone)]
pub struct FrameTimes {
    samples: [u32; FRAME_TIME_SAMPLES],
    /// Slot the next sample overwrites.
    next: usize,
    filled: usize,
}

impl FrameTimes {
    pub fn new() -> Self {
        Self {
            samples: [0; FRAME_TIME_SAMPLES],
            next: 0,
            filled: 0,
        }
    }

    /// Buffer pre-filled with `ms`, so the mean is meaningful from the start.
    pub fn primed(ms: u32) -> Self {
        Self {
            samples: [ms; FRAME_TIME_SAMPLES],
            next: 0,
            filled: FRAME_TIME_SAMPLES,
        }
    }

    /// Record a sample, replacing the oldest once the buffer is full.
    pub fn push(&mut self, ms: u32) {
        self.samples[self.next] = ms;
        self.next = (self.next + 1) % FRAME_TIME_SAMPLES;
        self.filled = (self.filled + 1).min(FRAME_TIME_SAMPLES);
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Rounded mean of the recorded samples; 0 when empty.
    pub fn mean(&self) -> u32 {
        if self.filled == 0 {
            return 0;
        }
        let sum: u64 = self.samples[..self.filled].iter().map(|&s| s as u64).sum();
        let n = self.filled as u64;
        ((sum + n / 2) / n) as u32
    }
}

impl Default for FrameTimes {
    fn default() -> Self {
        Self::new()
    }
}
