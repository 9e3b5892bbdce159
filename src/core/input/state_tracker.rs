//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state tracking with per-frame deltas.
//
// Architecture:
//   InputEvent → process_event() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: clear() → process_event()* → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks persistent state (held) and per-frame deltas (pressed/released).
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    buttons_pressed_this_frame: HashSet<MouseButton>,
    buttons_released_this_frame: HashSet<MouseButton>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas.
    pub(super) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.buttons_pressed_this_frame.clear();
        self.buttons_released_this_frame.clear();
    }

    /// Applies one event. Returns `true` only for a fresh press (UP → DOWN),
    /// so a repeated `KeyDown` for a held key returns `false`.
    pub(super) fn process_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::KeyDown(key) => {
                let fresh = self.keys_down.insert(key);
                if fresh {
                    self.keys_pressed_this_frame.insert(key);
                }
                fresh
            }

            InputEvent::KeyUp(key) => {
                if self.keys_down.remove(&key) {
                    self.keys_released_this_frame.insert(key);
                }
                false
            }

            InputEvent::MouseButtonDown(button) => {
                let fresh = self.buttons_down.insert(button);
                if fresh {
                    self.buttons_pressed_this_frame.insert(button);
                }
                fresh
            }

            InputEvent::MouseButtonUp(button) => {
                if self.buttons_down.remove(&button) {
                    self.buttons_released_this_frame.insert(button);
                }
                false
            }
        }
    }

    //--- Query API - Keyboard ---------------------------------------------

    /// `true` if the key went UP → DOWN during this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` if the key went DOWN → UP during this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    //--- Query API - Mouse Buttons ----------------------------------------

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed_this_frame.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released_this_frame.contains(&button)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
