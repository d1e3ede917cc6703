//! Core types module - shared constants and value types
//!
//! Everything in here is plain data with no dependencies, so the engine, the
//! terminal host and the tests can all agree on the same rule set.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 21 rows (indexed 0-20, top to bottom)
//! - **Spawn position**: row -1, col 3 (pieces keep their top row empty in the
//!   spawn rotation, so they appear flush with the top edge)
//!
//! # Speed Curve
//!
//! Gravity interval in milliseconds per row, indexed by level. Levels past the
//! end of the table stay on the last entry.
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 700ms |
//! | 1 | 550ms |
//! | 2 | 400ms |
//! | 3 | 316ms |
//! | ... | ... |
//! | 17+ | 10ms |
//!
//! Soft drop overrides the table with a fixed 50ms interval.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{InputEvent, PieceKind, Position, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//!
//! let event = InputEvent::from_str("hardDrop").unwrap();
//! assert_eq!(event, InputEvent::HardDrop);
//!
//! assert_eq!(Position::new(1, 2) + Position::new(3, 4), Position::new(4, 6));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 21);
//! ```

use std::ops::Add;

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: u8 = 10;

/// Field height in cells (21 rows)
pub const FIELD_HEIGHT: u8 = 21;

/// Cleared lines needed per level
pub const LEVEL_STEP: u32 = 6;

/// Gravity interval per level (milliseconds per row)
pub const SPEED_TABLE_MS: [u32; 18] = [
    700, 550, 400, 316, 250, 200, 166, 133, 100, 83, 70, 60, 50, 40, 30, 20, 15, 10,
];

/// Gravity interval while soft drop is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// Line clear scoring table
///
/// Base points for clearing N lines at once:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_CLEAR_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per row for a successful soft-drop gravity step
pub const SOFT_DROP_POINTS_PER_ROW: u32 = 1;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Where every new piece appears, in rotation 0
pub const SPAWN_POSITION: Position = Position::new(-1, 3);

/// A (row, col) pair. Rows grow downward, columns grow rightward.
///
/// Used both for absolute field coordinates and for offsets inside a piece's
/// 4x4 bounding box; adding an offset to a position gives an absolute cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position {
            row: self.row.saturating_add(rhs.row),
            col: self.col.saturating_add(rhs.col),
        }
    }
}

/// The seven piece kinds, in catalog order
///
/// The kind doubles as the piece's color tag. Display colors:
/// - **I**: blue
/// - **J**: orange
/// - **L**: lime
/// - **O**: magenta
/// - **S**: cyan
/// - **Z**: red
/// - **T**: yellow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the side panel
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::T => "T",
        }
    }
}

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied, colored like the piece that locked there
pub type Cell = Option<PieceKind>;

/// Discrete events accepted by the engine's input port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Shift the piece one column left
    MoveLeft,
    /// Shift the piece one column right
    MoveRight,
    /// Advance to the next rotation state
    RotateCw,
    /// Go back to the previous rotation state
    RotateCcw,
    /// Engage the faster soft-drop gravity
    SoftDropStart,
    /// Return to level gravity
    SoftDropStop,
    /// Drop to the ghost position and lock immediately
    HardDrop,
}

impl InputEvent {
    /// Parse an event from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::InputEvent;
    ///
    /// assert_eq!(InputEvent::from_str("moveLeft"), Some(InputEvent::MoveLeft));
    /// assert_eq!(InputEvent::from_str("softdropstart"), Some(InputEvent::SoftDropStart));
    /// assert_eq!(InputEvent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            "rotatecw" => Some(InputEvent::RotateCw),
            "rotateccw" => Some(InputEvent::RotateCcw),
            "softdropstart" => Some(InputEvent::SoftDropStart),
            "softdropstop" => Some(InputEvent::SoftDropStop),
            "harddrop" => Some(InputEvent::HardDrop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::RotateCw => "rotateCw",
            InputEvent::RotateCcw => "rotateCcw",
            InputEvent::SoftDropStart => "softDropStart",
            InputEvent::SoftDropStop => "softDropStop",
            InputEvent::HardDrop => "hardDrop",
        }
    }
}

/// Lifecycle phase of a game
///
/// Locking is not a phase: merge, clear, score and respawn happen atomically
/// inside a single tick or hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A piece is live and controllable
    Falling,
    /// The last spawn collided; only a restart leaves this phase
    GameOver,
}

/// Emitted every time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// Hard-drop bonus awarded just before the lock (0 for gravity locks).
    pub drop_bonus: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_set_constants() {
        assert_eq!(LEVEL_STEP, 6);
        assert_eq!(SOFT_DROP_INTERVAL_MS, 50);
        assert_eq!(LINE_CLEAR_SCORES[0], 0);
        assert_eq!(SPEED_TABLE_MS[0], 700);
        assert_eq!(SPEED_TABLE_MS[SPEED_TABLE_MS.len() - 1], 10);
        assert_eq!(SPAWN_POSITION, Position::new(-1, 3));
    }

    #[test]
    fn piece_kind_index_matches_catalog_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn input_event_names_roundtrip() {
        let all = [
            InputEvent::MoveLeft,
            InputEvent::MoveRight,
            InputEvent::RotateCw,
            InputEvent::RotateCcw,
            InputEvent::SoftDropStart,
            InputEvent::SoftDropStop,
            InputEvent::HardDrop,
        ];
        for event in all {
            assert_eq!(InputEvent::from_str(event.as_str()), Some(event));
        }
    }

    #[test]
    fn position_add_saturates() {
        let p = Position::new(i8::MAX, i8::MIN) + Position::new(1, -1);
        assert_eq!(p, Position::new(i8::MAX, i8::MIN));
    }
}
