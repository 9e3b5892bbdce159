//=========================================================================
// Input Buffer
//
// Transient per-frame store between the winit callbacks and the bridge
// channel.
//
// Responsibilities:
// - Keep discrete inputs (key/button edges) in arrival order
// - Drop consecutive duplicates (OS key repeat floods KeyDown)
// - Hand the whole frame over in one `drain()`
//
// Notes:
// Filled by `Platform::window_event`, emptied at `RedrawRequested`.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a busy frame so typical frames never reallocate.
    //
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
        }
    }

    //--- Discrete Event Handling -----------------------------------------
    //
    // Appends a discrete input. An event equal to the previous one is
    // ignored.
    //
    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's events, or `None` when nothing arrived.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.discrete.is_empty() {
            return None;
        }
        Some(self.discrete.drain(..).collect())
    }

    //--- Utilities --------------------------------------------------------
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.discrete.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
