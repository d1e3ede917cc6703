//! Press/release tracking for terminal environments.
//!
//! Soft drop is a held control: the engine needs a start and a stop. Terminals
//! with keyboard enhancement report releases directly. Others only repeat the
//! press while the key is held, so a hold ends once no press has arrived for
//! `release_timeout_ms`.

use crossterm::event::KeyEvent;

use crate::map::{is_soft_drop_key, map_key};
use crate::types::InputEvent;

// Longer than the common auto-repeat delays (X11 defaults to 660ms), so a held
// key keeps the soft drop engaged between the first press and the first repeat.
pub const DEFAULT_RELEASE_TIMEOUT_MS: u32 = 700;

/// Turns raw key presses/repeats/releases into engine input events.
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    since_soft_drop_press_ms: u32,
    release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(DEFAULT_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(release_timeout_ms: u32) -> Self {
        Self {
            soft_drop_held: false,
            since_soft_drop_press_ms: 0,
            release_timeout_ms,
        }
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// A key went down (or auto-repeated).
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<InputEvent> {
        if is_soft_drop_key(key) {
            self.since_soft_drop_press_ms = 0;
            if self.soft_drop_held {
                return None;
            }
            self.soft_drop_held = true;
            return Some(InputEvent::SoftDropStart);
        }
        map_key(key)
    }

    /// A key went up. Only the soft-drop key cares.
    pub fn handle_key_release(&mut self, key: KeyEvent) -> Option<InputEvent> {
        if is_soft_drop_key(key) && self.soft_drop_held {
            return Some(self.release_soft_drop());
        }
        None
    }

    /// Advance the release timeout by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<InputEvent> {
        if !self.soft_drop_held {
            return None;
        }
        self.since_soft_drop_press_ms = self.since_soft_drop_press_ms.saturating_add(elapsed_ms);
        if self.since_soft_drop_press_ms > self.release_timeout_ms {
            return Some(self.release_soft_drop());
        }
        None
    }

    fn release_soft_drop(&mut self) -> InputEvent {
        self.soft_drop_held = false;
        self.since_soft_drop_press_ms = 0;
        InputEvent::SoftDropStop
    }

    pub fn reset(&mut self) {
        self.soft_drop_held = false;
        self.since_soft_drop_press_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[test]
    fn test_soft_drop_press_then_release() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(key(KeyCode::Down)),
            Some(InputEvent::SoftDropStart)
        );
        assert!(ih.soft_drop_held());
        assert_eq!(
            ih.handle_key_release(key(KeyCode::Down)),
            Some(InputEvent::SoftDropStop)
        );
        assert!(!ih.soft_drop_held());
        assert_eq!(ih.handle_key_release(key(KeyCode::Down)), None);
    }

    #[test]
    fn test_repeats_keep_soft_drop_engaged() {
        let mut ih = InputHandler::with_release_timeout_ms(100);
        assert_eq!(
            ih.handle_key_press(key(KeyCode::Down)),
            Some(InputEvent::SoftDropStart)
        );
        for _ in 0..5 {
            assert_eq!(ih.update(80), None);
            assert_eq!(ih.handle_key_press(key(KeyCode::Down)), None);
        }
        assert!(ih.soft_drop_held());
    }

    #[test]
    fn test_timeout_stops_soft_drop() {
        let mut ih = InputHandler::with_release_timeout_ms(100);
        ih.handle_key_press(key(KeyCode::Char('s')));
        assert_eq!(ih.update(60), None);
        assert_eq!(ih.update(60), Some(InputEvent::SoftDropStop));
        assert_eq!(ih.update(60), None);
    }

    #[test]
    fn test_default_timeout_outlasts_first_repeat_delay() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.release_timeout_ms(), DEFAULT_RELEASE_TIMEOUT_MS);
        ih.handle_key_press(key(KeyCode::Down));

        // X11's default delay before the first auto-repeat.
        assert_eq!(ih.update(660), None);
        assert_eq!(ih.handle_key_press(key(KeyCode::Down)), None);
        assert!(ih.soft_drop_held());
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(key(KeyCode::Left)),
            Some(InputEvent::MoveLeft)
        );
        assert_eq!(
            ih.handle_key_press(key(KeyCode::Char(' '))),
            Some(InputEvent::HardDrop)
        );
        assert_eq!(ih.handle_key_release(key(KeyCode::Left)), None);
        assert_eq!(ih.update(10_000), None);
    }

    #[test]
    fn test_reset_drops_hold_silently() {
        let mut ih = InputHandler::new();
        ih.handle_key_press(key(KeyCode::Down));
        ih.reset();
        assert!(!ih.soft_drop_held());
        assert_eq!(ih.update(10_000), None);
    }
}
