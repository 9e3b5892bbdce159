//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use autobus::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::AppError;
pub use crate::config::Config;

// Simulation
pub use crate::core::bus::{Phase, Timing};
pub use crate::core::input::{BusCommand, KeyCode, MouseButton};
pub use crate::core::route::{PathLine, Route, Vec2};
pub use crate::core::{BusEvent, Simulation};

// Frame description
pub use crate::render::{Frame, Hud, Quad, TextureHandle};
