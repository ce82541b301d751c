//! Terminal rendering for the game.
//!
//! A small, game-oriented layer: a [`GameView`] draws a snapshot into a
//! [`FrameBuffer`], and the [`TerminalRenderer`] flushes that buffer to the
//! terminal, diffing against the previous frame.
//!
//! Board cells are drawn two terminal columns wide so that squares look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use autotris_core as core;
pub use autotris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{
    palette_color, AnchorY, AutopilotView, GameView, RenderReport, UnknownCell, Viewport, PALETTE,
};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
