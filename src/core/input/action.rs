//=========================================================================
// Bus Commands
//=========================================================================
//
// High-level commands produced by the input layer and consumed by the
// simulation. The mapping from physical input lives in `ActionMapper`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== BusCommand ==========================================================

/// Player intent while the bus is parked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusCommand {
    /// One passenger gets on.
    Board,

    /// One passenger gets off.
    Alight,

    /// A ticket inspector gets on and picks a penalty.
    Inspect,
}

impl fmt::Display for BusCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Board => "board",
            Self::Alight => "alight",
            Self::Inspect => "inspect",
        };
        f.write_str(name)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn command_is_hashable() {
        let mut set = HashSet::new();
        set.insert(BusCommand::Board);
        set.insert(BusCommand::Board);
        set.insert(BusCommand::Inspect);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn command_display_is_lowercase_verb() {
        assert_eq!(BusCommand::Board.to_string(), "board");
        assert_eq!(BusCommand::Alight.to_string(), "alight");
        assert_eq!(BusCommand::Inspect.to_string(), "inspect");
    }
}
