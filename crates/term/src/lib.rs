//! Terminal presentation for blockfall.
//!
//! Renders a [`core::GameSnapshot`] into a character framebuffer and flushes
//! it to the terminal with diffed writes. Nothing in here mutates game state.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
