//=========================================================================
// Input System
//
// High-level interface for device input within the engine.
// Owns the persistent `InputState` and the listener registration that
// feeds it, and exposes read-only queries for gameplay code.
//
// Responsibilities:
// - Attach to the platform's event hub exactly once (`start`)
// - Drain pending device events into `InputState` each tick (`poll`)
// - Expose keyboard, mouse and coordinate-transform queries
//
// Notes:
// `Input` is polled by the core loop; game code only reads from it.
// Stopping (or dropping) `Input` unregisters its listener.
//
//=========================================================================

//=== Submodules ==========================================================

mod event;
mod input_state;

//=== Public API ==========================================================

pub use event::{InputError, InputEvent, MouseButton};
pub use input_state::{ButtonRecord, InputState};

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== External Crates =====================================================

use log::{info, warn};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{EventHub, InputListener, TickControl};
use crate::core::Vector;

//=== Input ===============================================================

/// Keyboard and mouse state fed by an [`EventHub`].
///
/// # Examples
///
/// ```
/// use aetheric_canvas::core::input::Input;
/// use aetheric_canvas::core::platform_bridge::{EventHub, PlatformEvent};
/// use aetheric_canvas::core::input::InputEvent;
///
/// let hub = EventHub::new(16);
/// let mut input = Input::new();
/// assert!(input.start(&hub));
///
/// hub.dispatch(PlatformEvent::Inputs {
///     discrete: vec![InputEvent::key_down("Space")],
///     continuous: vec![],
/// });
/// input.poll();
///
/// assert!(input.is_key_down("space"));
/// ```
#[derive(Default)]
pub struct Input {
    state: InputState,
    listener: Option<InputListener>,
}

impl Input {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        Self::default()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Attaches to `hub`. Returns `false` (and changes nothing) if this
    /// input is already attached.
    pub fn start(&mut self, hub: &EventHub) -> bool {
        if let Some(listener) = &self.listener {
            warn!(
                target: "input",
                "Input already started (listener {:?}), ignoring",
                listener.id()
            );
            return false;
        }

        let listener = hub.attach();
        info!(target: "input", "Input started (listener {:?})", listener.id());
        self.listener = Some(listener);
        true
    }

    /// Detaches from the hub. Returns `false` if not started. State is kept.
    pub fn stop(&mut self) -> bool {
        match self.listener.take() {
            Some(listener) => {
                info!(target: "input", "Input stopped (listener {:?})", listener.id());
                listener.detach();
                true
            }
            None => false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.listener.is_some()
    }

    //--- poll() -----------------------------------------------------------
    //
    // Drains everything the platform sent since the last call.
    // Without a listener there is nothing to drain.
    //
    pub fn poll(&mut self) -> TickControl {
        match &self.listener {
            Some(listener) => listener.poll(&mut self.state),
            None => TickControl::Continue,
        }
    }

    //--- State Access -----------------------------------------------------

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Direct state access, e.g. for injecting synthetic events.
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Pressed state of every key seen so far (lowercase names).
    pub fn keystrokes(&self) -> &HashMap<String, bool> {
        self.state.keystrokes()
    }

    pub fn is_key_down(&self, key: &str) -> bool {
        self.state.is_key_down(key)
    }

    /// Last press/release record of every mouse button seen, by code.
    pub fn button_down(&self) -> &HashMap<u16, ButtonRecord> {
        self.state.button_down()
    }

    pub fn mouse_position(&self) -> Vector {
        self.state.mouse_position()
    }

    /// Current cursor position in world space.
    pub fn mouse_world_position(&self, camera_position: Vector) -> Vector {
        Self::screen_to_world_position(self.mouse_position(), camera_position)
    }

    //=====================================================================
    // Conversions
    //=====================================================================

    /// Translates a screen-space point into world space by removing the
    /// camera offset.
    pub fn screen_to_world_position(position: Vector, camera_position: Vector) -> Vector {
        position - camera_position
    }

    /// Maps `"left"`, `"middle"`, `"right"` to button codes 0, 1, 2.
    pub fn button_to_code(name: &str) -> Result<u16, InputError> {
        name.parse::<MouseButton>().map(MouseButton::code)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
