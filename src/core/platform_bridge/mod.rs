//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the winit platform layer and the core systems.
//
// The platform only knows how to push `PlatformEvent`s into a channel;
// the core only knows how to drain one. Neither side names the other's
// types.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side draining with bounded polling
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::PlatformError;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
