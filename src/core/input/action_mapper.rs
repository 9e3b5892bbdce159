//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps raw input events to bus commands based on configured bindings.
//
// Architecture:
//   key/button → HashMap → BusCommand
//
// Only presses resolve to commands; releases never do.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::BusCommand,
    event::{InputEvent, KeyCode, MouseButton},
};

//=== ActionMapper ========================================================

/// Maps input events to commands via key/button lookups.
#[derive(Debug, Clone)]
pub(crate) struct ActionMapper {
    key_bindings: HashMap<KeyCode, BusCommand>,
    mouse_bindings: HashMap<MouseButton, BusCommand>,
}

impl ActionMapper {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
        }
    }

    /// Stock bindings: left click boards, right click alights,
    /// `inspect_key` starts an inspection.
    pub(crate) fn with_defaults(inspect_key: KeyCode) -> Self {
        let mut mapper = Self::new();
        mapper.bind_mouse(MouseButton::Left, BusCommand::Board);
        mapper.bind_mouse(MouseButton::Right, BusCommand::Alight);
        mapper.bind_key(inspect_key, BusCommand::Inspect);
        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key to a command, replacing any previous binding.
    pub(crate) fn bind_key(&mut self, key: KeyCode, command: BusCommand) {
        self.key_bindings.insert(key, command);
    }

    /// Binds a mouse button to a command, replacing any previous binding.
    pub(crate) fn bind_mouse(&mut self, button: MouseButton, command: BusCommand) {
        self.mouse_bindings.insert(button, command);
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps an input event to a command.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<BusCommand> {
        match event {
            InputEvent::KeyDown(key) => self.key_bindings.get(key).copied(),
            InputEvent::MouseButtonDown(button) => self.mouse_bindings.get(button).copied(),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
