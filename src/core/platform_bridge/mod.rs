//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit, a browser, a test driver) with core
// systems.
//
// This module defines the contract between platform implementations and
// core logic, so platform backends can be swapped without changing core
// code.
//
// Components:
// - `interface`: Event types, loop control and error definitions
// - `event_hub`: Listener registry and per-listener channels
//
//=========================================================================

//=== Module Declarations =================================================

mod event_hub;
mod interface;

//=== Public API ==========================================================

pub use event_hub::{EventHub, InputListener, ListenerId};
pub use interface::{PlatformError, PlatformEvent, TickControl};
