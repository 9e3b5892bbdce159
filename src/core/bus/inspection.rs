//=========================================================================
// Ticket Inspection
//=========================================================================
//
// One-shot penalty mechanic. Started while the bus is parked, settled when
// the bus completes its next segment.
//
// Lifecycle:
//   idle ──begin(penalty)──► active ──resolve()──► idle
//                              │
//                              └─ begin() again: no-op
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Inspection ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inspection {
    active: bool,
    penalty: i32,
}

impl Inspection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws a penalty uniformly from `[0, passengers)`.
    ///
    /// An empty range (no passengers) yields 0.
    pub fn draw_penalty<R: Rng>(passengers: i32, rng: &mut R) -> i32 {
        if passengers > 0 {
            rng.gen_range(0..passengers)
        } else {
            0
        }
    }

    /// Arms the inspection with `penalty`. Returns `false` if one is
    /// already running, in which case nothing changes.
    pub fn begin(&mut self, penalty: i32) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.penalty = penalty;
        true
    }

    /// Settles a running inspection and returns how many heads leave the
    /// bus (`penalty + 1`, the inspector included).
    pub fn resolve(&mut self) -> Option<i32> {
        if !self.active {
            return None;
        }
        let removed = self.penalty + 1;
        self.active = false;
        self.penalty = 0;
        Some(removed)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn penalty(&self) -> i32 {
        self.penalty
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
