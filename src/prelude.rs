//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_canvas::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Game contract
pub use crate::core::game::{Game, GameContext};
pub use crate::core::Vector;

// Rendering
pub use crate::core::render::{
    Camera, Color, Display, FrameBounds, FrameBuffer, FrameWindow, PostProcess, RenderSurface,
    Renderable, SharedObject,
};

// Input system
pub use crate::core::input::{ButtonRecord, Input, InputError, InputEvent, InputState, MouseButton};

// Platform bridge
pub use crate::core::platform_bridge::{EventHub, InputListener, PlatformEvent, TickControl};
