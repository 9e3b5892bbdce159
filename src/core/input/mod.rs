//=========================================================================
// Input System
//
// Turns the platform's per-frame event batches into bus commands.
//
// Responsibilities:
// - Track held keys/buttons so OS key repeat does not re-fire commands
// - Map fresh presses to `BusCommand`s through `ActionMapper`
// - Preserve event order (two clicks in one frame board two passengers)
//
// Notes:
// Owned and driven by `CoreSystems`, once per frame, before the
// simulation update.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod action;
pub(crate) mod action_mapper;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::BusCommand;
pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::StateTracker;

//=== Internal Imports ====================================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Owns the input state and bindings for the running session.
pub struct InputSystem {
    state: StateTracker,
    mapper: ActionMapper,
    commands: Vec<BusCommand>,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    /// Creates an input system with the stock bindings.
    pub fn new(inspect_key: KeyCode) -> Self {
        Self {
            state: StateTracker::new(),
            mapper: ActionMapper::with_defaults(inspect_key),
            commands: Vec::with_capacity(8),
        }
    }

    //--- process_frame() --------------------------------------------------
    //
    // Consumes all input batches received during the current frame, in
    // order, and returns the commands they produced.
    //
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) -> &[BusCommand] {
        self.state.clear();
        self.commands.clear();

        for event in batches.iter().flatten() {
            if self.state.process_event(event) {
                if let Some(command) = self.mapper.map_event(event) {
                    self.commands.push(command);
                }
            }
        }

        &self.commands
    }

    //--- Query Methods ----------------------------------------------------

    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.state.is_key_down(key)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
