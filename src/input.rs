//! Keyboard state folded from winit events.
//!
//! Renderers never see raw key events; they ask "is this key down right now"
//! once per frame, the same way a polling windowing API would.

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Set of physical keys currently held down.
#[derive(Debug, Default, Clone)]
pub struct KeyStates {
    down: HashSet<KeyCode>,
}

impl KeyStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    /// Forget every held key, e.g. when the window loses focus mid-press.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn apply_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            log::debug!("ignoring unidentified key {:?}", event.physical_key);
            return;
        };
        match event.state {
            ElementState::Pressed => self.press(code),
            ElementState::Released => self.release(code),
        }
    }
}
