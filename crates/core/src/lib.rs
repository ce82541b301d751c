//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule: the board with its permanent floor row,
//! the shape catalog and matrix rotation, the uniform piece source, scoring,
//! and the live [`GameState`]. It has no dependencies on the terminal or on
//! the move-search engine, so the same state can be played by a person, by the
//! autopilot, or headless in tests.
//!
//! # Module Structure
//!
//! - [`board`]: grid with floor row, collision, merge, and line clearing
//! - [`game_state`]: active piece, gravity, scoring, pause and game over
//! - [`pieces`]: shape catalog, clockwise rotation, the falling piece
//! - [`rng`]: seeded LCG and the one-piece preview source
//! - [`scoring`]: line clear points, levels, and gravity speed
//! - [`snapshot`]: owned copies of the state for rendering
//!
//! # Example
//!
//! ```
//! use autotris_core::GameState;
//! use autotris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drops score one point per row travelled
//! assert!(game.score() > 0);
//! assert_eq!(game.pieces_locked(), 1);
//! ```
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time to apply gravity.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use autotris_types as types;

// Re-export commonly used types for convenience
pub use board::{lock_piece_and_clear_lines, Board, FLOOR_CELL};
pub use game_state::{is_game_over, GameState};
pub use pieces::{rotate_clockwise, unique_rotation_count, Piece, Shape};
pub use rng::{PieceSource, SimpleRng};
pub use scoring::{drop_interval_ms, drop_score, level_after, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
