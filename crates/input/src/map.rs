//! Key mapping from terminal events to engine input events.

use crate::types::InputEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to an input event.
///
/// The soft-drop key maps to [`InputEvent::SoftDropStart`]; the matching stop
/// is produced by [`crate::InputHandler`] on release or timeout.
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(InputEvent::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(InputEvent::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(InputEvent::SoftDropStart),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(InputEvent::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(InputEvent::RotateCcw),

        KeyCode::Char(' ') => Some(InputEvent::HardDrop),

        _ => None,
    }
}

/// Whether the key is the held soft-drop control.
pub fn is_soft_drop_key(key: KeyEvent) -> bool {
    map_key(key) == Some(InputEvent::SoftDropStart)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
