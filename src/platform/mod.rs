//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the engine's core thread via the
// event hub.
//
// Architecture:
// ```text
//  Main Thread:                     Core Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Input           │
//  │   ↓                      │    │   └─ InputState  │
//  │  InputProcessor          │    │  ↓               │
//  │   ├─ Converts Winit      │    │  Game::update    │
//  │   └─ Tracks cursor       │    │  ↓               │
//  │   ↓                      │    │  Camera          │
//  │  InputBuffer             │    │                  │
//  │   ├─ discrete: Vec<>     │    └──────────────────┘
//  │   └─ continuous: Set<>   │             ↑
//  │   ↓                      │             │
//  │  RedrawRequested         │             │
//  │   ↓ (flush)              │             │
//  │  EventHub::dispatch ─────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
//
//  Frame Boundary: RedrawRequested
//    → All buffered input sent as one batch
//    → Core processes at fixed TPS (independent of refresh rate)
//    → Empty buffers NOT sent
// ```
//
// Responsibilities:
// - Create and manage the OS window
// - Convert Winit types → engine InputEvents
// - Buffer input until the frame boundary
// - Dispatch batched events to every attached listener
//
// The platform must run on the thread that called `Engine::run()`
// (Winit requires the main thread on macOS/iOS).
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{EventHub, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window settings applied when the window is created.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window manager and input event aggregator.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(hub, config)`
/// 2. **Execution**: `platform.run()` blocks in the Winit event loop
/// 3. **Shutdown**: window closed → `WindowClosed` dispatched → loop exits
///    → the platform (and its hub handle) is dropped
///
/// This type is NOT Send/Sync and stays on the main thread.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    config: WindowConfig,

    /// Buffers discrete/continuous input until frame boundary.
    buffer: InputBuffer,

    /// Fan-out to every attached input listener.
    hub: EventHub,

    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub fn new(hub: EventHub, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            hub,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Dispatches buffered input as one [`PlatformEvent::Inputs`].
    /// Called on every `RedrawRequested`; empty buffers send nothing.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let discrete_count = discrete.len();
        let continuous_count = continuous.len();

        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        let delivered = self.hub.dispatch(PlatformEvent::Inputs { discrete, continuous });
        if delivered == 0 {
            warn!(
                target: "platform::input",
                "No listener received {} events ({} discrete, {} continuous)",
                discrete_count + continuous_count,
                discrete_count,
                continuous_count
            );
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.hub.dispatch(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window if it doesn't exist yet. On mobile, this may be
    /// called multiple times (suspend/resume cycle).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self
                    .input_processor
                    .process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push_discrete(event);
                } else {
                    trace!(target: "platform::input", "Unnamed key ignored");
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary
                self.flush_input_buffer();

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
