//=========================================================================
// Autobus — Library Root
//
// A bus loops an elliptical route of stations. Passengers board and
// alight while it is parked; a ticket inspector can get on and take a
// random penalty off the bus at the next station.
//
// Responsibilities:
// - Expose the runtime facade (`Engine`, `EngineBuilder`)
// - Expose the simulation and frame description for embedding/tests
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use autobus::{Config, EngineBuilder};
//
// fn main() -> Result<(), autobus::AppError> {
//     let config = Config::load_or_default("autobus.toml")?;
//     EngineBuilder::new(config).build().run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the simulation, input mapping and route geometry.
// `render` turns simulation state into a backend-agnostic frame.
//
pub mod config;
pub mod core;
pub mod prelude;
pub mod render;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and event loop integration and is
// not part of the public API surface.
//
mod engine;
mod error;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::config::{Config, ConfigError};
pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder, HeadlessSummary, HEADLESS_STEP};
pub use error::AppError;
