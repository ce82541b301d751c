//! Terminal input: maps `crossterm` key events to [`types::GameAction`].
//!
//! Independent of any rendering code, so the same mapping serves the
//! interactive loop and tests.

pub mod map;

pub use autotris_types as types;

pub use map::{handle_key_event, should_quit};
