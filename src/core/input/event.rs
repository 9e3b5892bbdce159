//=========================================================================
// Input Event Types
//
// Internal representation of low-level input events.
//
// Abstracts platform-specific input (winit) into a small, portable
// format used by the input subsystem.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (press edges, repeat filtering)
//         ↓
//    ActionMapper → BusCommand
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons and anything non-standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,

    /// Fallback for keys not mapped by the input layer.
    Unidentified,
}

impl KeyCode {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
        KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
        KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
        KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
        KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
        KeyCode::KeyZ,
    ];

    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];

    /// Parses a key name as written in the config file.
    ///
    /// Accepts a single letter or digit (`"K"`, `"k"`, `"7"`) and the named
    /// keys `Space`, `Enter`, `Escape`, `Tab` (case-insensitive). Returns
    /// `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let mut chars = name.chars();

        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                return Some(Self::LETTERS[index]);
            }
            if c.is_ascii_digit() {
                return Some(Self::DIGITS[(c as u8 - b'0') as usize]);
            }
            return None;
        }

        match name.to_ascii_lowercase().as_str() {
            "space" => Some(Self::Space),
            "enter" | "return" => Some(Self::Enter),
            "escape" | "esc" => Some(Self::Escape),
            "tab" => Some(Self::Tab),
            _ => None,
        }
    }
}

//=== InputEvent ==========================================================

/// Low-level discrete input event from the platform layer.
///
/// Equality is by type + payload, which lets the platform buffer drop
/// consecutive duplicates (OS key repeat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_single_letters_any_case() {
        assert_eq!(KeyCode::from_name("K"), Some(KeyCode::KeyK));
        assert_eq!(KeyCode::from_name("k"), Some(KeyCode::KeyK));
        assert_eq!(KeyCode::from_name("a"), Some(KeyCode::KeyA));
        assert_eq!(KeyCode::from_name("Z"), Some(KeyCode::KeyZ));
    }

    #[test]
    fn from_name_digits() {
        assert_eq!(KeyCode::from_name("0"), Some(KeyCode::Digit0));
        assert_eq!(KeyCode::from_name("9"), Some(KeyCode::Digit9));
    }

    #[test]
    fn from_name_named_keys() {
        assert_eq!(KeyCode::from_name("Space"), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_name(" enter "), Some(KeyCode::Enter));
        assert_eq!(KeyCode::from_name("ESC"), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_name("tab"), Some(KeyCode::Tab));
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(KeyCode::from_name(""), None);
        assert_eq!(KeyCode::from_name("F13"), None);
        assert_eq!(KeyCode::from_name("?"), None);
        assert_eq!(KeyCode::from_name("é"), None);
    }

    #[test]
    fn events_compare_by_type_and_payload() {
        assert_eq!(InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyDown(KeyCode::KeyA));
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyUp(KeyCode::KeyA));
        assert_ne!(
            InputEvent::MouseButtonDown(MouseButton::Left),
            InputEvent::MouseButtonDown(MouseButton::Right)
        );
    }
}
