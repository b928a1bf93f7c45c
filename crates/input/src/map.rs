//! Key mapping from terminal events to game commands.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Command;

/// Commands produced by a single key press.
pub type KeyCommands = ArrayVec<Command, 2>;

/// Keys that hold the soft drop while pressed.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Down
            | KeyCode::Char('j')
            | KeyCode::Char('J')
            | KeyCode::Char('s')
            | KeyCode::Char('S')
    )
}

/// Map a key press to game commands.
///
/// Down engages the soft drop and steps the piece one row (locking it if it
/// already rests on something).
pub fn map_key(key: KeyEvent) -> KeyCommands {
    let mut out = KeyCommands::new();
    if is_soft_drop_key(key.code) {
        out.push(Command::SoftDropOn);
        out.push(Command::MoveDown);
        return out;
    }

    let command = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Command::MoveLeft
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::MoveRight
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Command::RotateCw,
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Command::RotateCcw,

        // Actions
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Pause => Command::PauseToggle,
        KeyCode::Enter => Command::Start,

        // Debug gravity
        KeyCode::Char('+') | KeyCode::Char('=') => Command::GravityUp,
        KeyCode::Char('-') | KeyCode::Char('_') => Command::GravityDown,

        _ => return out,
    };
    out.push(command);
    out
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
