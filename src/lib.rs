//=========================================================================
// Aetheric Canvas: Library Root
//
// This crate defines the public API surface of Aetheric Canvas: a 2D
// camera that composes frames from world objects, and device input
// tracking fed by a windowing platform.
//
// Responsibilities:
// - Expose the engine entry point (`Engine`, `EngineBuilder`)
// - Expose the camera, input and rendering building blocks under `core`
// - Keep internal modules (like `platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use aetheric_canvas::prelude::*;
//
// EngineBuilder::new()
//     .build()
//     .run(FrameBuffer::new(800, 600), || MyGame::new())?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the engine systems (camera, input, game contract,
// event plumbing). They have no windowing dependency at runtime and can
// be driven directly, e.g. from tests.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop, event
// conversion) and is kept private.
//
// `engine` defines the main engine entry point and thread wiring.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
