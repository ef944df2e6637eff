//=========================================================================
// Aetheric Canvas Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(display, factory)──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ attaches input to the event hub
//         ├─ with_channel_capacity() ├─ spawns the core thread
//         ├─ with_title()            ├─ runs the platform
//         ├─ with_viewport()         └─ blocks until exit
//         └─ with_background()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::game::Game;
use crate::core::input::Input;
use crate::core::platform_bridge::{EventHub, PlatformError};
use crate::core::render::{Color, Display};
use crate::core::CoreLoop;
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 event batches per listener
/// - **Title**: "Aetheric Canvas"
/// - **Viewport**: 800x600 (window inner size)
/// - **Background**: black
///
/// # Examples
///
/// ```no_run
/// use aetheric_canvas::prelude::*;
///
/// struct Empty;
///
/// impl<D: Display> Game<D> for Empty {
///     fn update(&mut self, _ctx: &mut GameContext<'_, D>) {}
///     fn render_list(&self) -> &[SharedObject] { &[] }
/// }
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_title("Demo")
///     .with_viewport(640, 480)
///     .build()
///     .run(FrameBuffer::new(640, 480), || Empty)
///     .expect("platform failure");
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    title: String,
    viewport: (u32, u32),
    background: Color,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            title: "Aetheric Canvas".to_owned(),
            viewport: (800, 600),
            background: Color::BLACK,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the per-listener buffer size for platform → core batches.
    ///
    /// A listener that falls this many batches behind misses new ones.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the window's inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Viewport must be non-empty, got {}x{}", width, height);
        self.viewport = (width, height);
        self
    }

    /// Sets the color the camera fills each frame with.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, viewport: {}x{})",
            self.tps, self.channel_capacity, self.viewport.0, self.viewport.1
        );

        Engine {
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: WindowConfig {
                title: self.title,
                width: self.viewport.0,
                height: self.viewport.1,
            },
            background: self.background,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Aetheric Canvas runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreLoop (Logic Thread @ TPS)
///   │     └─► Input, Game, Camera → Display
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: EventHub (PlatformEvent over bounded channels)
/// ```
pub struct Engine {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    background: Color,
}

impl Engine {
    //--- Execution --------------------------------------------------------

    /// Starts the engine runtime and blocks until the application exits.
    ///
    /// `factory` runs on the core thread and builds the game there, so
    /// the game itself need not be `Send`.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event hub and attaches the core thread's input
    /// 2. Spawns the core thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: `WindowClosed` is dispatched and the hub is
    ///    dropped, so the core thread exits; it is then joined
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop fails. The core thread
    /// is still shut down and joined first.
    pub fn run<D, G, F>(self, display: D, factory: F) -> Result<(), PlatformError>
    where
        D: Display + Send + 'static,
        G: Game<D> + 'static,
        F: FnOnce() -> G + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create the event hub -------------------------------------
        let hub = EventHub::new(self.channel_capacity);
        let mut input = Input::new();
        input.start(&hub);

        info!("Event hub created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = CoreLoop::<D, G>::spawn(input, display, self.background, self.tps, factory);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(hub, self.window);
        info!("Platform initialized, entering event loop");

        let result = platform.run();
        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
