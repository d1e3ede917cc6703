//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::InputEvent`]s and tracks the held soft-drop key, including
//! on terminals that never emit key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{InputHandler, DEFAULT_RELEASE_TIMEOUT_MS};
pub use map::{is_soft_drop_key, map_key, should_quit};
