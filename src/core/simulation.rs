//=========================================================================
// Simulation
//=========================================================================
//
// Single owner of all mutable bus state: motion, passengers, inspection.
//
// Per frame:
//   InputSystem → apply(command)* → update(dt) → Frame::build(&sim)
//
// Commands only take effect while the bus is parked. Every state change
// comes back as a `BusEvent` and is logged under the `core::bus` target.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use log::{debug, info};
use rand::rngs::SmallRng;

//=== Internal Dependencies ===============================================

use crate::config::Config;
use crate::core::bus::{BusState, Inspection, Passengers, Phase, Timing, Transition};
use crate::core::input::BusCommand;
use crate::core::route::{Route, Vec2};

//=== IgnoreReason ========================================================

/// Why a command left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The bus is between stations.
    Traveling,

    /// Boarding at capacity.
    Full,

    /// Alighting with nobody on board.
    Empty,

    /// An inspection is already running.
    InspectionActive,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Traveling => "bus is traveling",
            Self::Full => "bus is full",
            Self::Empty => "bus is empty",
            Self::InspectionActive => "inspection already active",
        };
        f.write_str(text)
    }
}

//=== BusEvent ============================================================

/// Observable state change produced by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Departed { from: usize, to: usize },
    Arrived { station: usize },
    PassengerBoarded { count: i32 },
    PassengerAlighted { count: i32 },
    InspectionStarted { penalty: i32, count: i32 },
    InspectionResolved { removed: i32, count: i32 },
    CommandIgnored { command: BusCommand, reason: IgnoreReason },
}

impl fmt::Display for BusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Departed { from, to } => write!(f, "departed station {} for station {}", from, to),
            Self::Arrived { station } => write!(f, "arrived at station {}", station),
            Self::PassengerBoarded { count } => write!(f, "passenger boarded, {} on board", count),
            Self::PassengerAlighted { count } => write!(f, "passenger alighted, {} on board", count),
            Self::InspectionStarted { penalty, count } => {
                write!(f, "inspector boarded with penalty {}, {} on board", penalty, count)
            }
            Self::InspectionResolved { removed, count } => {
                write!(f, "inspection removed {}, {} on board", removed, count)
            }
            Self::CommandIgnored { command, reason } => {
                write!(f, "{} ignored: {}", command, reason)
            }
        }
    }
}

fn log_event(event: &BusEvent) {
    match event {
        BusEvent::CommandIgnored { .. } => debug!(target: "core::bus", "{}", event),
        _ => info!(target: "core::bus", "{}", event),
    }
}

//=== Simulation ==========================================================

pub struct Simulation {
    route: Route,
    bus: BusState,
    timing: Timing,
    passengers: Passengers,
    inspection: Inspection,
    rng: SmallRng,
}

impl Simulation {
    /// Bus parked at station 0 with nobody on board.
    ///
    /// `rng` drives the inspection penalty draws only.
    pub fn new(config: &Config, route: Route, rng: SmallRng) -> Self {
        Self {
            route,
            bus: BusState::new(),
            timing: config.timing(),
            passengers: Passengers::new(config.passengers.capacity),
            inspection: Inspection::new(),
            rng,
        }
    }

    //--- Commands ---------------------------------------------------------

    /// Applies one player command.
    pub fn apply(&mut self, command: BusCommand) -> BusEvent {
        let event = if !self.bus.is_waiting() {
            BusEvent::CommandIgnored {
                command,
                reason: IgnoreReason::Traveling,
            }
        } else {
            match command {
                BusCommand::Board => self.board(),
                BusCommand::Alight => self.alight(),
                BusCommand::Inspect => {
                    if self.inspection.is_active() {
                        return self.emit(BusEvent::CommandIgnored {
                            command,
                            reason: IgnoreReason::InspectionActive,
                        });
                    }
                    let penalty = Inspection::draw_penalty(self.passengers.count(), &mut self.rng);
                    return self.begin_inspection(penalty);
                }
            }
        };
        self.emit(event)
    }

    fn board(&mut self) -> BusEvent {
        if self.passengers.board() {
            BusEvent::PassengerBoarded {
                count: self.passengers.count(),
            }
        } else {
            BusEvent::CommandIgnored {
                command: BusCommand::Board,
                reason: IgnoreReason::Full,
            }
        }
    }

    fn alight(&mut self) -> BusEvent {
        if self.passengers.alight() {
            BusEvent::PassengerAlighted {
                count: self.passengers.count(),
            }
        } else {
            BusEvent::CommandIgnored {
                command: BusCommand::Alight,
                reason: IgnoreReason::Empty,
            }
        }
    }

    /// Starts an inspection with a known penalty; the inspector boards.
    pub(crate) fn begin_inspection(&mut self, penalty: i32) -> BusEvent {
        let event = if self.inspection.begin(penalty) {
            self.passengers.admit_inspector();
            BusEvent::InspectionStarted {
                penalty,
                count: self.passengers.count(),
            }
        } else {
            BusEvent::CommandIgnored {
                command: BusCommand::Inspect,
                reason: IgnoreReason::InspectionActive,
            }
        };
        self.emit(event)
    }

    //--- Update -----------------------------------------------------------

    /// Advances the bus by `dt` seconds.
    ///
    /// An arrival with a running inspection yields `Arrived` followed by
    /// `InspectionResolved`.
    pub fn update(&mut self, dt: f32) -> Vec<BusEvent> {
        let mut events = Vec::new();

        match self.bus.advance(dt, self.timing, &self.route) {
            None => {}
            Some(Transition::Departed { from, to }) => {
                events.push(BusEvent::Departed { from, to });
            }
            Some(Transition::Arrived { station }) => {
                events.push(BusEvent::Arrived { station });
                if let Some(removed) = self.inspection.resolve() {
                    self.passengers.remove_unchecked(removed);
                    events.push(BusEvent::InspectionResolved {
                        removed,
                        count: self.passengers.count(),
                    });
                }
            }
        }

        events.iter().for_each(log_event);
        events
    }

    fn emit(&self, event: BusEvent) -> BusEvent {
        log_event(&event);
        event
    }

    //--- Queries ----------------------------------------------------------

    pub fn bus_position(&self) -> Vec2 {
        self.bus.position(&self.route)
    }

    pub fn phase(&self) -> Phase {
        self.bus.phase()
    }

    /// Parked station while waiting, destination while traveling.
    pub fn station(&self) -> usize {
        self.bus.station()
    }

    pub fn segment_progress(&self) -> f32 {
        self.bus.progress()
    }

    pub fn passengers(&self) -> i32 {
        self.passengers.count()
    }

    pub fn inspection(&self) -> &Inspection {
        &self.inspection
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn bus(&self) -> &BusState {
        &self.bus
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn sim_with_seed(seed: u64) -> Simulation {
        let config = Config::default();
        let route = config.build_route();
        Simulation::new(&config, route, SmallRng::seed_from_u64(seed))
    }

    fn sim() -> Simulation {
        sim_with_seed(7)
    }

    fn board_n(sim: &mut Simulation, n: usize) {
        for _ in 0..n {
            sim.apply(BusCommand::Board);
        }
    }

    /// Waits out the dwell and drives the whole next segment.
    fn complete_segment(sim: &mut Simulation) -> Vec<BusEvent> {
        let mut events = sim.update(10.0);
        events.extend(sim.update(5.0));
        events
    }

    //=====================================================================
    // Motion
    //=====================================================================

    #[test]
    fn starts_waiting_at_station_zero() {
        let sim = sim();
        assert_eq!(sim.phase(), Phase::Waiting);
        assert_eq!(sim.station(), 0);
        assert_eq!(sim.passengers(), 0);
        assert_eq!(sim.bus_position(), sim.route().position(0));
    }

    #[test]
    fn departs_after_dwell_and_lands_exactly_on_next_station() {
        let mut sim = sim();

        assert!(sim.update(9.99).is_empty());
        assert_eq!(sim.update(0.01), vec![BusEvent::Departed { from: 0, to: 1 }]);
        assert_eq!(sim.phase(), Phase::Traveling);

        assert!(sim.update(4.0).is_empty());
        assert_eq!(sim.update(1.0), vec![BusEvent::Arrived { station: 1 }]);
        assert_eq!(sim.phase(), Phase::Waiting);
        assert_eq!(sim.segment_progress(), 1.0);
        assert_eq!(sim.bus_position(), sim.route().position(1));
    }

    #[test]
    fn oversized_delta_fires_single_transition() {
        let mut sim = sim();

        assert_eq!(sim.update(25.0), vec![BusEvent::Departed { from: 0, to: 1 }]);
        assert_eq!(sim.bus().wait_timer(), 0.0);
        assert_eq!(sim.bus().segment_timer(), 0.0);

        assert_eq!(sim.update(100.0), vec![BusEvent::Arrived { station: 1 }]);
        assert_eq!(sim.bus_position(), sim.route().position(1));
    }

    #[test]
    fn station_index_wraps_after_full_lap() {
        let mut sim = sim();
        for _ in 0..sim.route().len() {
            complete_segment(&mut sim);
        }
        assert_eq!(sim.station(), 0);
        assert_eq!(sim.bus_position(), sim.route().position(0));
    }

    #[test]
    fn travel_position_interpolates_chord() {
        let mut sim = sim();
        sim.update(10.0);
        sim.update(2.5);

        let from = sim.route().position(0);
        let to = sim.route().position(1);
        let expected = from.lerp(to, 0.5);
        let actual = sim.bus_position();

        assert!((actual.x - expected.x).abs() < 1e-6);
        assert!((actual.y - expected.y).abs() < 1e-6);
    }

    //=====================================================================
    // Passengers
    //=====================================================================

    #[test]
    fn boarding_respects_capacity() {
        let mut sim = sim();
        board_n(&mut sim, 60);
        assert_eq!(sim.passengers(), 50);
        assert_eq!(
            sim.apply(BusCommand::Board),
            BusEvent::CommandIgnored {
                command: BusCommand::Board,
                reason: IgnoreReason::Full
            }
        );
    }

    #[test]
    fn alighting_never_goes_below_zero() {
        let mut sim = sim();
        board_n(&mut sim, 2);
        for _ in 0..5 {
            sim.apply(BusCommand::Alight);
        }
        assert_eq!(sim.passengers(), 0);
        assert_eq!(
            sim.apply(BusCommand::Alight),
            BusEvent::CommandIgnored {
                command: BusCommand::Alight,
                reason: IgnoreReason::Empty
            }
        );
    }

    #[test]
    fn commands_ignored_while_traveling() {
        let mut sim = sim();
        board_n(&mut sim, 3);
        sim.update(10.0);

        for command in [BusCommand::Board, BusCommand::Alight, BusCommand::Inspect] {
            assert_eq!(
                sim.apply(command),
                BusEvent::CommandIgnored {
                    command,
                    reason: IgnoreReason::Traveling
                }
            );
        }
        assert_eq!(sim.passengers(), 3);
        assert!(!sim.inspection().is_active());
    }

    //=====================================================================
    // Inspection
    //=====================================================================

    #[test]
    fn inspection_penalty_settles_on_arrival() {
        let mut sim = sim();
        board_n(&mut sim, 5);

        assert_eq!(
            sim.begin_inspection(2),
            BusEvent::InspectionStarted { penalty: 2, count: 6 }
        );

        let events = complete_segment(&mut sim);
        assert_eq!(
            events,
            vec![
                BusEvent::Departed { from: 0, to: 1 },
                BusEvent::Arrived { station: 1 },
                BusEvent::InspectionResolved { removed: 3, count: 3 },
            ]
        );
        assert_eq!(sim.passengers(), 3);
        assert!(!sim.inspection().is_active());
        assert_eq!(sim.inspection().penalty(), 0);
    }

    #[test]
    fn drawn_penalty_is_within_passenger_count() {
        for seed in 0..200 {
            let mut sim = sim_with_seed(seed);
            board_n(&mut sim, 5);

            match sim.apply(BusCommand::Inspect) {
                BusEvent::InspectionStarted { penalty, count } => {
                    assert!((0..5).contains(&penalty), "seed {} drew {}", seed, penalty);
                    assert_eq!(count, 6);
                }
                other => panic!("unexpected event {:?}", other),
            }
        }
    }

    #[test]
    fn inspection_with_empty_bus_draws_zero() {
        let mut sim = sim();
        assert_eq!(
            sim.apply(BusCommand::Inspect),
            BusEvent::InspectionStarted { penalty: 0, count: 1 }
        );
        complete_segment(&mut sim);
        assert_eq!(sim.passengers(), 0);
    }

    #[test]
    fn retriggering_inspection_is_noop() {
        let mut sim = sim();
        board_n(&mut sim, 4);
        sim.begin_inspection(1);

        assert_eq!(
            sim.apply(BusCommand::Inspect),
            BusEvent::CommandIgnored {
                command: BusCommand::Inspect,
                reason: IgnoreReason::InspectionActive
            }
        );
        assert_eq!(sim.passengers(), 5);
        assert_eq!(sim.inspection().penalty(), 1);
    }

    #[test]
    fn inspector_boards_past_capacity() {
        let mut sim = sim();
        board_n(&mut sim, 50);
        sim.begin_inspection(0);
        assert_eq!(sim.passengers(), 51);
    }

    #[test]
    fn resolution_has_no_floor() {
        let mut sim = sim();
        board_n(&mut sim, 5);
        sim.begin_inspection(4);
        for _ in 0..6 {
            sim.apply(BusCommand::Alight);
        }
        assert_eq!(sim.passengers(), 0);

        complete_segment(&mut sim);
        assert_eq!(sim.passengers(), -5);
    }

    #[test]
    fn plain_arrival_does_not_touch_passengers() {
        let mut sim = sim();
        board_n(&mut sim, 3);
        let events = complete_segment(&mut sim);
        assert_eq!(events.len(), 2);
        assert_eq!(sim.passengers(), 3);
    }
}
