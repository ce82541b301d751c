//! Autotris (workspace facade crate).
//!
//! A falling-block puzzle played by a one-ply heuristic search. The game
//! rules, the search engine, the terminal view, and key mapping live in
//! dedicated crates under `crates/`; this package re-exports them as
//! `autotris::{core, engine, input, term, types}` and owns the session log
//! used by the binary.

pub use autotris_core as core;
pub use autotris_engine as engine;
pub use autotris_input as input;
pub use autotris_term as term;
pub use autotris_types as types;

pub mod session_log;
