//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the game core, the search engine, and the terminal front end alike.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9)
//! - **Rows**: 22 playable rows (indexed 0-21), plus one permanent floor row
//!   at index 22 that is always fully occupied
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_FPS` | 10 | Frame rate of the terminal loop |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest gravity interval |
//! | `LOG_INTERVAL_MS` | 1000 | Session log cadence |
//!
//! # Examples
//!
//! ```
//! use autotris_types::{GameAction, ShapeKind, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(ShapeKind::T.color_id(), 1);
//! assert_eq!(ShapeKind::O.unique_rotations(), 1);
//! assert_ne!(GameAction::HardDrop, GameAction::SoftDrop);
//!
//! assert_eq!(BOARD_COLS, 10);
//! assert_eq!(BOARD_ROWS, 22);
//! ```

/// Playable board width in cells
pub const BOARD_COLS: usize = 10;

/// Playable board height in cells (the floor row is extra)
pub const BOARD_ROWS: usize = 22;

/// Frame rate of the interactive loop
pub const MAX_FPS: u32 = 10;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 50;

/// Fastest gravity interval regardless of level
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Interval between session log rows
pub const LOG_INTERVAL_MS: u32 = 1000;

/// Lines needed per level: the level goes up once `lines >= level * LINES_PER_LEVEL`
pub const LINES_PER_LEVEL: u32 = 6;

/// Line clear scoring table
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A cell on the game board
///
/// `0` is empty. Any other value is occupied; values `1..=7` are the
/// color ids of the seven shape kinds, larger values have no palette entry.
pub type Cell = u8;

/// The seven shape kinds, in catalog order
///
/// The color id of a kind is its catalog position plus one, and it is the
/// value stored in the shape matrix and in board cells after a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    T,
    S,
    Z,
    J,
    L,
    I,
    O,
}

impl ShapeKind {
    /// All kinds in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::I,
        ShapeKind::O,
    ];

    /// Position in the catalog (0-based)
    pub fn index(self) -> usize {
        match self {
            ShapeKind::T => 0,
            ShapeKind::S => 1,
            ShapeKind::Z => 2,
            ShapeKind::J => 3,
            ShapeKind::L => 4,
            ShapeKind::I => 5,
            ShapeKind::O => 6,
        }
    }

    /// Cell value written into the board for this kind
    pub fn color_id(self) -> Cell {
        self.index() as Cell + 1
    }

    /// Number of distinct orientations reachable by clockwise rotation
    ///
    /// The square has one, the long bar two, every other kind four.
    pub fn unique_rotations(self) -> u8 {
        match self {
            ShapeKind::O => 1,
            ShapeKind::I => 2,
            _ => 4,
        }
    }
}

/// Game actions that can be applied to the live session
///
/// Both the keyboard and the autopilot drive the game through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (scores one point, locks when blocked)
    SoftDrop,
    /// Repeat soft drops until the piece locks
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Restart,
}

/// Event recorded when a piece locks onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub line_clear_score: u32,
}
