//=========================================================================
// Bus Motion
//=========================================================================
//
// Two-state machine driving the bus around the route.
//
// ```text
//           wait_timer >= dwell
//   Waiting ───────────────────► Traveling
//      ▲     station += 1 (mod n)     │
//      │                              │
//      └──────────────────────────────┘
//           segment_timer / travel >= 1.0  (t clamped to 1.0)
// ```
//
// One transition at most per `advance()` call. Time accumulated past a
// threshold is dropped: both timers restart from zero.
//
//=========================================================================

//=== Module Declarations =================================================

mod inspection;
mod passengers;

//=== Public API ==========================================================

pub use inspection::Inspection;
pub use passengers::Passengers;

//=== Internal Dependencies ===============================================

use crate::core::route::{Route, Vec2};

//=== Phase ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Parked at `BusState::station`; passengers may board.
    Waiting,

    /// Driving from the previous station towards `BusState::station`.
    Traveling,
}

//=== Timing ==============================================================

/// Fixed durations of the two phases, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub dwell: f32,
    pub travel: f32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            dwell: 10.0,
            travel: 5.0,
        }
    }
}

//=== Transition ==========================================================

/// Phase change reported by [`BusState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Departed { from: usize, to: usize },
    Arrived { station: usize },
}

//=== BusState ============================================================

/// Position and timers of the bus.
///
/// While `Waiting`, `station` is where the bus is parked. While
/// `Traveling`, `station` is the destination and `progress` the fraction
/// of the segment already covered.
#[derive(Debug, Clone, PartialEq)]
pub struct BusState {
    phase: Phase,
    station: usize,
    progress: f32,
    wait_timer: f32,
    segment_timer: f32,
}

impl BusState {
    /// Bus parked at station 0 with fresh timers.
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            station: 0,
            progress: 0.0,
            wait_timer: 0.0,
            segment_timer: 0.0,
        }
    }

    //--- Update -----------------------------------------------------------

    /// Accumulates `dt` seconds into the active timer and fires at most one
    /// transition.
    ///
    /// Non-finite or negative deltas count as zero.
    pub fn advance(&mut self, dt: f32, timing: Timing, route: &Route) -> Option<Transition> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.phase {
            Phase::Waiting => {
                self.wait_timer += dt;
                if self.wait_timer < timing.dwell {
                    return None;
                }

                let from = self.station;
                self.station = route.next(from);
                self.phase = Phase::Traveling;
                self.progress = 0.0;
                self.segment_timer = 0.0;
                self.wait_timer = 0.0;

                Some(Transition::Departed { from, to: self.station })
            }

            Phase::Traveling => {
                self.segment_timer += dt;
                self.progress = self.segment_timer / timing.travel;
                if self.progress < 1.0 {
                    return None;
                }

                self.progress = 1.0;
                self.phase = Phase::Waiting;

                Some(Transition::Arrived { station: self.station })
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Current position: the parked station, or the interpolated point on
    /// the chord between the departed and destination stations.
    pub fn position(&self, route: &Route) -> Vec2 {
        match self.phase {
            Phase::Waiting => route.position(self.station),
            Phase::Traveling => {
                let from = route.position(route.previous(self.station));
                let to = route.position(self.station);
                from.lerp(to, self.progress)
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == Phase::Waiting
    }

    pub fn station(&self) -> usize {
        self.station
    }

    /// Fraction of the current segment covered, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn wait_timer(&self) -> f32 {
        self.wait_timer
    }

    pub fn segment_timer(&self) -> f32 {
        self.segment_timer
    }
}

impl Default for BusState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
