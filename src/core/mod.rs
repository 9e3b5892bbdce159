//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for everything that is not platform code.
//
// Responsibilities:
// - Drain platform events from the bridge channel
// - Turn input into bus commands and apply them
// - Advance the simulation by the measured frame delta
// - Rebuild the frame description and the window title
//
// Notes:
// Runs on the event-loop thread, driven by the platform once per
// `RedrawRequested`. Communication with the platform happens only
// through the bridge channel; the orchestrator never sees winit types.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod bus;
pub mod input;
pub(crate) mod platform_bridge;
pub mod route;
pub mod simulation;

//=== Public API ==========================================================

pub(crate) use platform_bridge::TickControl;
pub use simulation::{BusEvent, IgnoreReason, Simulation};

//=== External Dependencies ===============================================

use std::time::Instant;

use crossbeam_channel::Receiver;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::config::{Config, ConfigError, WindowConfig};
use crate::render::{Frame, RenderAssets};
use input::InputSystem;
use platform_bridge::{EventCollector, PlatformEvent};
use route::PathLine;

//=== FrameClock ==========================================================

/// Wall-clock delta between frames, clamped to `max_delta`.
#[derive(Debug, Clone)]
pub(crate) struct FrameClock {
    last: Option<Instant>,
    max_delta: f32,
}

impl FrameClock {
    pub(crate) fn new(max_delta: f32) -> Self {
        Self {
            last: None,
            max_delta,
        }
    }

    /// Seconds since the previous call. The first call returns 0.
    pub(crate) fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_delta)
    }
}

//=== CoreSystems =========================================================

pub(crate) struct CoreSystems {
    collector: EventCollector,
    input: InputSystem,
    simulation: Simulation,
    path: PathLine,
    assets: RenderAssets,
    window: WindowConfig,
    clock: FrameClock,
    frame: Frame,
    title: String,
    title_dirty: bool,
}

impl CoreSystems {
    //--- Construction -----------------------------------------------------
    //
    // Builds the route and the wiggly path from `config.seed`, and seeds
    // the inspection draws from a separate stream so that using the
    // inspection never changes the geometry.
    //
    pub(crate) fn new(
        config: &Config,
        receiver: Receiver<PlatformEvent>,
        assets: RenderAssets,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let route = config.build_route();
        let mut geometry_rng = SmallRng::seed_from_u64(config.seed);
        let path = PathLine::generate(
            &route,
            config.route.wiggle_samples,
            config.route.wiggle_amplitude,
            &mut geometry_rng,
        );

        info!(
            target: "core",
            "Route ready: {} stations, {} path points (seed {})",
            route.len(),
            path.len(),
            config.seed
        );

        let inspection_rng = SmallRng::seed_from_u64(config.seed.wrapping_add(1));
        let simulation = Simulation::new(config, route, inspection_rng);
        let frame = Frame::build(&simulation, &path, assets.textures(), &config.window);

        Ok(Self {
            collector: EventCollector::new(receiver),
            input: InputSystem::new(config.inspect_key()?),
            simulation,
            path,
            assets,
            window: config.window.clone(),
            clock: FrameClock::new(config.timing.max_frame_delta),
            frame,
            title: config.window.title.clone(),
            title_dirty: true,
        })
    }

    //--- tick() -----------------------------------------------------------
    //
    // One frame:
    //  1. Drain platform events (exit on close/disconnect)
    //  2. Map input to commands and apply them
    //  3. Advance the simulation by the clamped wall-clock delta
    //  4. Rebuild the frame description
    //
    pub(crate) fn tick(&mut self, now: Instant) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            info!(target: "core", "Core systems shutting down");
            return TickControl::Exit;
        }

        self.handle_input();

        let dt = self.clock.tick(now);
        self.step(dt);

        TickControl::Continue
    }

    fn handle_input(&mut self) {
        let commands = self.input.process_frame(self.collector.batches());
        if !commands.is_empty() {
            debug!(target: "core", "Applying {} commands", commands.len());
        }
        for &command in commands {
            self.simulation.apply(command);
        }
    }

    /// Advances the simulation by `dt` seconds and rebuilds the frame.
    pub(crate) fn step(&mut self, dt: f32) -> Vec<BusEvent> {
        let events = self.simulation.update(dt);

        self.frame
            .rebuild(&self.simulation, &self.path, self.assets.textures(), &self.window);

        let title = self.frame.hud.title(&self.window.title);
        if title != self.title {
            self.title = title;
            self.title_dirty = true;
        }

        events
    }

    //--- Query Methods ----------------------------------------------------

    /// The window title, once per change.
    pub(crate) fn take_title_change(&mut self) -> Option<&str> {
        if !self.title_dirty {
            return None;
        }
        self.title_dirty = false;
        Some(self.title.as_str())
    }

    pub(crate) fn frame(&self) -> &Frame {
        &self.frame
    }

    pub(crate) fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &PathLine {
        &self.path
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, MouseButton};
    use crossbeam_channel::{unbounded, Sender};
    use std::time::Duration;

    fn systems() -> (Sender<PlatformEvent>, CoreSystems) {
        let (tx, rx) = unbounded();
        let core = CoreSystems::new(&Config::default(), rx, RenderAssets::unloaded()).unwrap();
        (tx, core)
    }

    fn click(button: MouseButton) -> Vec<InputEvent> {
        vec![InputEvent::MouseButtonDown(button), InputEvent::MouseButtonUp(button)]
    }

    //=====================================================================
    // FrameClock
    //=====================================================================

    #[test]
    fn clock_first_tick_is_zero_then_measures() {
        let mut clock = FrameClock::new(0.25);
        let start = Instant::now();

        assert_eq!(clock.tick(start), 0.0);
        let dt = clock.tick(start + Duration::from_millis(100));
        assert!((dt - 0.1).abs() < 1e-4);
    }

    #[test]
    fn clock_clamps_stalls() {
        let mut clock = FrameClock::new(0.25);
        let start = Instant::now();
        clock.tick(start);

        assert_eq!(clock.tick(start + Duration::from_secs(3)), 0.25);
    }

    //=====================================================================
    // CoreSystems
    //=====================================================================

    #[test]
    fn tick_applies_clicks_as_passengers() {
        let (tx, mut core_sys) = systems();
        let mut batch = click(MouseButton::Left);
        batch.extend(click(MouseButton::Left));
        tx.send(PlatformEvent::Inputs(batch)).unwrap();

        assert_eq!(core_sys.tick(Instant::now()), TickControl::Continue);
        assert_eq!(core_sys.simulation().passengers(), 2);
    }

    #[test]
    fn tick_exits_on_window_closed() {
        let (tx, mut core_sys) = systems();
        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert_eq!(core_sys.tick(Instant::now()), TickControl::Exit);
    }

    #[test]
    fn tick_exits_when_platform_is_gone() {
        let (tx, mut core_sys) = systems();
        drop(tx);
        assert_eq!(core_sys.tick(Instant::now()), TickControl::Exit);
    }

    #[test]
    fn input_is_applied_before_update() {
        let (tx, mut core_sys) = systems();
        let start = Instant::now();
        core_sys.tick(start);

        // Last frame of the dwell: the click still lands before departure.
        core_sys.step(9.9);
        tx.send(PlatformEvent::Inputs(click(MouseButton::Left))).unwrap();
        core_sys.tick(start + Duration::from_millis(200));

        assert_eq!(core_sys.simulation().passengers(), 1);
        assert!(!core_sys.simulation().bus().is_waiting());
    }

    #[test]
    fn inspect_key_starts_inspection() {
        let (tx, mut core_sys) = systems();
        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::KeyK)]))
            .unwrap();
        core_sys.tick(Instant::now());

        assert!(core_sys.simulation().inspection().is_active());
        assert_eq!(core_sys.simulation().passengers(), 1);
    }

    #[test]
    fn step_drives_full_segment() {
        let (_tx, mut core_sys) = systems();
        let departed = core_sys.step(10.0);
        let arrived = core_sys.step(5.0);

        assert_eq!(departed, vec![BusEvent::Departed { from: 0, to: 1 }]);
        assert_eq!(arrived, vec![BusEvent::Arrived { station: 1 }]);
        assert_eq!(
            core_sys.simulation().bus_position(),
            core_sys.simulation().route().position(1)
        );
    }

    #[test]
    fn title_reported_once_per_change() {
        let (_tx, mut core_sys) = systems();
        core_sys.step(0.0);
        assert_eq!(
            core_sys.take_title_change(),
            Some("Autobus | station 0 | 0 on board | waiting")
        );
        assert_eq!(core_sys.take_title_change(), None);

        core_sys.step(0.1);
        assert_eq!(core_sys.take_title_change(), None);

        core_sys.step(10.0);
        assert_eq!(
            core_sys.take_title_change(),
            Some("Autobus | station 1 | 0 on board | traveling")
        );
    }

    #[test]
    fn same_seed_same_path() {
        let (_a, core_a) = systems();
        let (_b, core_b) = systems();
        assert_eq!(core_a.path(), core_b.path());
        assert_eq!(core_a.frame().path, core_a.path().points());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (_tx, rx) = unbounded();
        let mut config = Config::default();
        config.route.stations = 1;

        assert!(CoreSystems::new(&config, rx, RenderAssets::unloaded()).is_err());
    }
}
