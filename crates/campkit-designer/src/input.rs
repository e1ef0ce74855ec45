//! Keyboard modifier state for the editor session.
//!
//! The set of held keys lives on the editor session and is passed to the
//! code that needs it; there is no process-wide key registry.

use std::collections::HashSet;
use tracing::trace;

pub const KEY_SHIFT: &str = "Shift";

/// Keys currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pressed_keys: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: impl Into<String>) {
        let key = key.into();
        trace!(key = key.as_str(), "key down");
        self.pressed_keys.insert(key);
    }

    pub fn key_up(&mut self, key: &str) {
        trace!(key, "key up");
        self.pressed_keys.remove(key);
    }

    /// Forgets every held key, e.g. when the editor loses focus.
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn shift(&self) -> bool {
        self.is_pressed(KEY_SHIFT)
    }

    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> {
        self.pressed_keys.iter().map(String::as_str)
    }
}
