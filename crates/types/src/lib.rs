//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the rules crate, the terminal front-end and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centred on row 0
//!
//! # Timing and Gravity
//!
//! Gravity is measured in board rows per second and integrated by the game tick
//! using the elapsed time, so the fall speed does not depend on the frame rate.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal tick interval (~60 FPS) |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a landed piece locks |
//! | `STARTING_GRAVITY` | 0.46875 | 1 row per 128 frames at 60 FPS |
//! | `SOFT_DROP_GRAVITY` | 7.5 | 1 row per 8 frames at 60 FPS |
//! | `LINES_PER_LEVEL` | 10 | Lines needed for a level-up |
//! | `LEVEL_UP_GRAVITY_FACTOR` | 2.0 | Gravity multiplier per level-up |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{Command, Orientation, PieceKind, Tile, Turn};
//!
//! let kind = PieceKind::from_str("o").unwrap();
//! assert_eq!(kind.tile(), Tile::Yellow);
//!
//! assert_eq!(Orientation::North.rotated(Turn::Cw), Orientation::East);
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Nominal tick interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Nominal ticks per second, used to bound gravity.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Lock delay when a piece has landed (500ms)
pub const LOCK_DELAY_MS: u32 = 500;

/// Gravity at level 1, in rows per second (one row every 128 frames).
pub const STARTING_GRAVITY: f64 = FRAMES_PER_SECOND as f64 / 128.0;

/// Minimum gravity while soft drop is held (one row every 8 frames).
pub const SOFT_DROP_GRAVITY: f64 = FRAMES_PER_SECOND as f64 / 8.0;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity multiplier applied on every level-up.
pub const LEVEL_UP_GRAVITY_FACTOR: f64 = 2.0;

/// Number of frame durations averaged by the terminal runtime.
pub const FRAME_TIME_SAMPLES: usize = 8;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines, multiplied by `level + 1`:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];


/// A single cell of a grid.
///
/// `Empty` is the only unoccupied value; every other variant is the colour of
/// the piece that filled the cell. The discriminants are stable and used as the
/// numeric cell encoding in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0x00,
    LightBlue = 0x01,
    DarkBlue = 0x02,
    Orange = 0x03,
    Yellow = 0x04,
    Green = 0x05,
    Red = 0x06,
    Magenta = 0x07,
}

impl Tile {
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }

    #[inline(always)]
    pub fn is_filled(self) -> bool {
        self != Tile::Empty
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a numeric cell value. Unknown values map to `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x00 => Some(Tile::Empty),
            0x01 => Some(Tile::LightBlue),
            0x02 => Some(Tile::DarkBlue),
            0x03 => Some(Tile::Orange),
            0x04 => Some(Tile::Yellow),
            0x05 => Some(Tile::Green),
            0x06 => Some(Tile::Red),
            0x07 => Some(Tile::Magenta),
            _ => None,
        }
    }
}

/// The seven tetromino identities
///
/// Each kind pairs a shape with a tile colour:
/// - **T**: Magenta
/// - **I**: Light blue, 1x4 bar
/// - **O**: Yellow, 2x2 square
/// - **J**: Dark blue
/// - **L**: Orange (mirror of J)
/// - **S**: Green
/// - **Z**: Red (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    I,
    O,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds, in template order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn index(self) -> usize {
        match self {
            PieceKind::T => 0,
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "t",
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Colour used for every cell of this kind.
    pub fn tile(self) -> Tile {
        match self {
            PieceKind::T => Tile::Magenta,
            PieceKind::I => Tile::LightBlue,
            PieceKind::O => Tile::Yellow,
            PieceKind::J => Tile::DarkBlue,
            PieceKind::L => Tile::Orange,
            PieceKind::S => Tile::Green,
            PieceKind::Z => Tile::Red,
        }
    }

    /// Occupancy matrix of the North orientation, row by row.
    pub fn north_matrix(self) -> &'static [&'static [bool]] {
        const X: bool = true;
        const O: bool = false;
        match self {
            PieceKind::T => &[&[O, X, O], &[X, X, X]],
            PieceKind::I => &[&[X, X, X, X]],
            PieceKind::O => &[&[X, X], &[X, X]],
            PieceKind::J => &[&[X, O, O], &[X, X, X]],
            PieceKind::L => &[&[O, O, X], &[X, X, X]],
            PieceKind::S => &[&[O, X, X], &[X, X, O]],
            PieceKind::Z => &[&[X, X, O], &[O, X, X]],
        }
    }
}

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// +90°
    Cw,
    /// -90°
    Ccw,
}

/// Rotation states of a piece
///
/// - **North**: Spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::Orientation;
    ///
    /// assert_eq!(Orientation::North.rotate_cw(), Orientation::East);
    /// assert_eq!(Orientation::West.rotate_cw(), Orientation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::Orientation;
    ///
    /// assert_eq!(Orientation::North.rotate_ccw(), Orientation::West);
    /// assert_eq!(Orientation::East.rotate_ccw(), Orientation::North);
    /// ```
    pub fn rotate_ccw(self) -> Self {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }

    pub fn rotated(self, turn: Turn) -> Self {
        match turn {
            Turn::Cw => self.rotate_cw(),
            Turn::Ccw => self.rotate_ccw(),
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Orientation::North => 0,
            Orientation::East => 90,
            Orientation::South => 180,
            Orientation::West => 270,
        }
    }

    /// Index into per-orientation tables (North = 0 ... West = 3).
    pub fn index(self) -> usize {
        match self {
            Orientation::North => 0,
            Orientation::East => 1,
            Orientation::South => 2,
            Orientation::West => 3,
        }
    }

}

/// One-cell translation requested for a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Offset of a piece's bounding box within the board.
///
/// `x` is always a whole column. `y` may be fractional while a piece is
/// falling between rows; every grid lookup uses [`Position::row`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: i32,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0.0 };

    pub fn new(x: i32, y: f64) -> Self {
        Self { x, y }
    }

    /// The row the position falls in (`floor(y)`).
    #[inline(always)]
    pub fn row(&self) -> i32 {
        self.y.floor() as i32
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy as f64,
        }
    }
}

/// Lifecycle state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Menu,
    Running,
    Paused,
    GameOver,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Menu => "menu",
            GameState::Running => "running",
            GameState::Paused => "paused",
            GameState::GameOver => "gameOver",
        }
    }
}

/// Commands accepted from the input layer
///
/// Each command is a no-op outside the states it applies to; see
/// `Game::apply` in the core crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it has already landed
    MoveDown,
    /// Start holding soft drop
    SoftDropOn,
    /// Release soft drop
    SoftDropOff,
    /// Drop to the lowest legal position and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle Running ⇄ Paused
    PauseToggle,
    /// Start a new game from the menu or after game over
    Start,
    /// Double gravity (debug)
    GravityUp,
    /// Halve gravity (debug)
    GravityDown,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveDown,
        Command::SoftDropOn,
        Command::SoftDropOff,
        Command::HardDrop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::PauseToggle,
        Command::Start,
        Command::GravityUp,
        Command::GravityDown,
    ];

    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("softdropon"), Some(Command::SoftDropOn));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "movedown" => Some(Command::MoveDown),
            "softdropon" => Some(Command::SoftDropOn),
            "softdropoff" => Some(Command::SoftDropOff),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "pausetoggle" => Some(Command::PauseToggle),
            "start" => Some(Command::Start),
            "gravityup" => Some(Command::GravityUp),
            "gravitydown" => Some(Command::GravityDown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::SoftDropOn => "softDropOn",
            Command::SoftDropOff => "softDropOff",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::PauseToggle => "pauseToggle",
            Command::Start => "start",
            Command::GravityUp => "gravityUp",
            Command::GravityDown => "gravityDown",
        }
    }
}

/// Outcome of the most recent lock, recorded by the game for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// The piece was rejected because it locked too close to the spawn row.
    pub top_out: bool,
    pub lines_cleared: u32,
    pub score_awarded: u32,
    /// Number of levels gained by this lock.
    pub level_up: u32,
}
