//! Soft-drop latch for terminal environments.
//!
//! Most terminals only report presses (plus auto-repeat), never releases. The
//! latch treats the soft drop as held for as long as presses keep arriving and
//! lets go after `release_timeout_ms` without one. Where the terminal does
//! report releases, the release ends the soft drop immediately.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{is_soft_drop_key, map_key, KeyCommands};
use crate::types::Command;

// Long enough to bridge the gap between auto-repeat presses.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct SoftDropLatch {
    held: bool,
    idle_ms: u32,
    release_timeout_ms: u32,
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self {
            held: false,
            idle_ms: 0,
            release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Translate a key event into commands.
    ///
    /// `SoftDropOn` is only emitted when the latch engages, not on every
    /// repeat.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyCommands {
        if key.kind == KeyEventKind::Release {
            let mut out = KeyCommands::new();
            if is_soft_drop_key(key.code) && self.held {
                self.held = false;
                out.push(Command::SoftDropOff);
            }
            return out;
        }

        let mut out = map_key(key);
        if out.contains(&Command::SoftDropOn) {
            self.idle_ms = 0;
            if self.held {
                out.retain(|c| *c != Command::SoftDropOn);
            } else {
                self.held = true;
            }
        }
        out
    }

    /// Let time pass; returns `SoftDropOff` when the latch times out.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<Command> {
        if !self.held {
            return None;
        }
        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.release_timeout_ms {
            self.held = false;
            self.idle_ms = 0;
            return Some(Command::SoftDropOff);
        }
        None
    }
}

impl Default for SoftDropLatch {
    fn default() -> Self {
        Self::new()
    }
}
