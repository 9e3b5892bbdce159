//=========================================================================
// Autobus Engine
//
// Main entry point and coordinator for the application.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine ──run()──────────> [winit loop]
//         │                          │                        Platform
//         └─ with_channel_capacity() │                          └─ CoreSystems
//                                    └──run_headless(secs)──> [fixed 60 Hz steps]
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::info;

//=== Internal Dependencies ===============================================

use crate::config::Config;
use crate::core::{BusEvent, CoreSystems};
use crate::error::AppError;
use crate::platform::Platform;
use crate::render::RenderAssets;

/// Step used when running without a window.
pub const HEADLESS_STEP: f32 = 1.0 / 60.0;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Channel capacity**: 128 platform events
///
/// # Examples
///
/// ```no_run
/// use autobus::{Config, EngineBuilder};
///
/// EngineBuilder::new(Config::default())
///     .with_channel_capacity(256)
///     .build()
///     .run()
///     .unwrap();
/// ```
pub struct EngineBuilder {
    config: Config,
    channel_capacity: usize,
}

impl EngineBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            channel_capacity: 128,
        }
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Flushes that find the channel full are dropped with a warning.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> Engine {
        info!("Building engine (channel: {})", self.channel_capacity);
        Engine {
            config: self.config,
            channel_capacity: self.channel_capacity,
        }
    }
}

//=== HeadlessSummary =====================================================

/// Outcome of [`Engine::run_headless`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub departures: usize,
    pub arrivals: usize,
    pub station: usize,
    pub passengers: i32,
}

//=== Engine ==============================================================

/// Autobus runtime.
pub struct Engine {
    config: Config,
    channel_capacity: usize,
}

impl Engine {
    //--- Execution --------------------------------------------------------

    /// Opens the window and blocks until it closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Loads shaders (required) and textures (optional)
    /// 2. Creates the bounded platform → core channel
    /// 3. Builds the core systems (route, path, simulation)
    /// 4. Runs the platform event loop until the window closes
    ///
    /// # Errors
    ///
    /// Any start-up failure: missing shaders, invalid config, no event
    /// loop or no window.
    pub fn run(self) -> Result<(), AppError> {
        info!("Starting engine runtime");

        //--- 1. Resolve assets --------------------------------------------
        let assets = RenderAssets::load(&self.config.assets)?;

        //--- 2. Create communication channel ------------------------------
        let (tx, rx) = bounded(self.channel_capacity);
        info!("Platform channel created (capacity: {})", self.channel_capacity);

        //--- 3. Core systems ----------------------------------------------
        let core = CoreSystems::new(&self.config, rx, assets)?;

        //--- 4. Launch the platform subsystem -----------------------------
        let platform = Platform::new(self.config.window.clone(), tx, core);
        info!("Platform initialized, entering event loop");
        platform.run()?;

        info!("Engine shutdown complete");
        Ok(())
    }

    /// Runs the simulation for `seconds` of simulated time at a fixed
    /// 60 Hz step, without a window or assets.
    pub fn run_headless(self, seconds: f32) -> Result<HeadlessSummary, AppError> {
        let frames = (seconds.max(0.0) / HEADLESS_STEP).round() as u64;
        info!("Running headless for {} frames", frames);

        let (_tx, rx) = bounded(self.channel_capacity);
        let mut core = CoreSystems::new(&self.config, rx, RenderAssets::unloaded())?;

        let mut departures = 0;
        let mut arrivals = 0;
        for _ in 0..frames {
            for event in core.step(HEADLESS_STEP) {
                match event {
                    BusEvent::Departed { .. } => departures += 1,
                    BusEvent::Arrived { .. } => arrivals += 1,
                    _ => {}
                }
            }
        }

        let sim = core.simulation();
        let summary = HeadlessSummary {
            frames,
            departures,
            arrivals,
            station: sim.station(),
            passengers: sim.passengers(),
        };
        info!("Headless run finished: {:?}", summary);
        Ok(summary)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new(Config::default());
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new(Config::default()).with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new(Config::default()).with_channel_capacity(0);
    }

    //=====================================================================
    // Headless Tests
    //=====================================================================

    #[test]
    fn headless_covers_one_segment() {
        let summary = EngineBuilder::new(Config::default())
            .build()
            .run_headless(16.0)
            .unwrap();

        assert_eq!(summary.frames, 960);
        assert_eq!(summary.departures, 1);
        assert_eq!(summary.arrivals, 1);
        assert_eq!(summary.station, 1);
        assert_eq!(summary.passengers, 0);
    }

    #[test]
    fn headless_zero_seconds_does_nothing() {
        let summary = EngineBuilder::new(Config::default())
            .build()
            .run_headless(0.0)
            .unwrap();

        assert_eq!(summary.frames, 0);
        assert_eq!(summary.station, 0);
    }

    #[test]
    fn headless_rejects_invalid_config() {
        let mut config = Config::default();
        config.timing.dwell_seconds = 0.0;

        let err = EngineBuilder::new(config).build().run_headless(1.0).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn run_fails_without_shaders() {
        let mut config = Config::default();
        config.assets.textured_vertex = "does/not/exist.vert".into();

        let err = EngineBuilder::new(config).build().run().unwrap_err();
        assert!(matches!(err, AppError::Asset(_)));
    }
}
