//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule and has no dependency on terminals, input
//! devices or clocks:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is a plain function or method over owned data
//! - **Allocation-free**: fields, pieces and snapshots are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes, parsed from 4x4 character grids
//! - [`rng`]: seedable LCG used for uniform piece draws
//! - [`geometry`]: rotation, translation, collision and ghost projection
//! - [`field`]: the 21x10 grid with merge and line clearing
//! - [`scoring`]: score table, level and speed curve
//! - [`game_state`]: the falling / lock / spawn / game-over state machine
//! - [`snapshot`]: read-only render view with ghost and active overlays
//! - [`timer`] and [`session`]: gravity scheduling and auto-restart
//!
//! # Game Rules
//!
//! - **Randomizer**: uniform, independent draws (no bag)
//! - **Rotation**: fixed rotation states, no wall kicks
//! - **Lock**: a piece locks on the first gravity step that would collide
//! - **Ghost Piece**: shows where the current piece will land
//! - **Scoring**: `(level + 1) * [0, 40, 100, 300, 1200][lines]`, +1 per soft-drop row,
//!   +2 per hard-drop row
//! - **Levels**: one level per 6 cleared lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::InputEvent;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply(InputEvent::MoveRight);
//! game.apply(InputEvent::RotateCw);
//! game.apply(InputEvent::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod field;
pub mod game_state;
pub mod geometry;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use field::{Field, LineClear};
pub use game_state::{ActivePiece, GameState, TickOutcome};
pub use geometry::{
    collides, ghost_position, move_down, move_left, move_right, rotate_left, rotate_right, Ghost,
};
pub use pieces::{all_pieces, piece, random_piece, Piece, Shape};
pub use rng::SimpleRng;
pub use scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, effective_interval_ms,
    get_drop_interval_ms,
};
pub use session::Session;
pub use snapshot::{GameSnapshot, SnapshotCell};
pub use timer::TickTimer;
