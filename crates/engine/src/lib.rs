//! Move-search engine
//!
//! Given a board and the falling piece, the engine enumerates every legal
//! placement, scores the board each would leave with a fixed linear heuristic,
//! and picks the best one. The executor then turns that decision into the
//! same primitive actions a player would press.
//!
//! The search looks at one piece only; the previewed next piece is ignored.
//!
//! # Example
//!
//! ```
//! use autotris_core::{Board, Piece};
//! use autotris_engine::choose_move;
//! use autotris_types::ShapeKind;
//!
//! let board = Board::default();
//! let piece = Piece::spawn(ShapeKind::O, board.cols());
//! let best = choose_move(&board, &piece).unwrap();
//! assert_eq!(best.column, 0);
//! assert_eq!(best.row, 20);
//! ```

pub mod autopilot;
pub mod eval;
pub mod executor;
pub mod placement;
pub mod search;

pub use autopilot::Autopilot;
pub use eval::{features, score, BoardFeatures};
pub use executor::{apply_step, next_action, plan_actions, DropStyle, ExecuteError, StepOutcome};
pub use placement::{enumerate_placements, find_lowest_position, Placement};
pub use search::{choose_move, choose_scored_move, rank_placements, ScoredPlacement};
