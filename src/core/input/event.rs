//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level device events.
//
// This module abstracts away platform-specific input (e.g. Winit, a
// browser) into a portable format consumed by `InputState`.
//
// Responsibilities:
// - Represent keyboard and mouse inputs in a stable, portable way
// - Provide equality and hashing semantics for deduplication
// - Enable event coalescing (multiple MouseMoved → last position)
// - Name mouse buttons and map them to their numeric codes
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputState (keystrokes / button records / mouse position)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

//=== Internal Dependencies ===============================================

use crate::core::Vector;

//=== MouseButton =========================================================

/// Named mouse button.
///
/// Buttons are stored in input state by their numeric platform code
/// (the DOM `MouseEvent.button` convention):
///
/// | Button   | Code |
/// |----------|------|
/// | `Left`   | 0    |
/// | `Middle` | 1    |
/// | `Right`  | 2    |
///
/// Side buttons and anything else are tracked by raw code only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,

    /// Wheel click.
    Middle,

    /// Secondary button.
    Right,
}

impl MouseButton {
    pub const fn code(self) -> u16 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

impl FromStr for MouseButton {
    type Err = InputError;

    /// Parses `"left"`, `"middle"` or `"right"` (exact, lowercase).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "left" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            "right" => Ok(Self::Right),
            other => Err(InputError::UnknownButton(other.to_owned())),
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== InputError ==========================================================

/// Errors raised by input queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A button name outside `left` / `middle` / `right`.
    UnknownButton(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownButton(name) => write!(f, "Unknown mouse button: {:?}", name),
        }
    }
}

impl std::error::Error for InputError {}

//=== InputEvent ==========================================================

/// Low-level device event from the platform layer.
///
/// Keys are identified by the name of the key as the platform reports it
/// (the produced character, or a name such as `"ArrowLeft"`); mouse
/// buttons by their numeric code. Positions are in screen space (pixels,
/// top-left origin).
///
/// # Equality & Hashing Semantics
///
/// Events compare by type + key/button, never by coordinates:
///
/// ```text
/// KeyDown{"a"}            == KeyDown{"a"}              ✓
/// KeyDown{"a"}            == KeyUp{"a"}                ✗ (different type)
/// MouseButtonDown{0, p1}  == MouseButtonDown{0, p2}    ✓ (position ignored)
/// MouseMoved{p1}          == MouseMoved{p2}            ✓ (always equal)
/// ```
///
/// This lets the platform buffer coalesce mouse movement (last position
/// wins) and drop repeated discrete events.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key pressed (or auto-repeated).
    KeyDown { key: String },

    /// Key released.
    KeyUp { key: String },

    /// Mouse button pressed at `position`.
    MouseButtonDown { button: u16, position: Vector },

    /// Mouse button released at `position`.
    MouseButtonUp { button: u16, position: Vector },

    /// Cursor moved to `position`.
    MouseMoved { position: Vector },

    /// Unrecognized or unsupported event; ignored by input state.
    Unidentified,
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }

    pub fn mouse_down(button: u16, x: f32, y: f32) -> Self {
        Self::MouseButtonDown { button, position: Vector::new(x, y) }
    }

    pub fn mouse_up(button: u16, x: f32, y: f32) -> Self {
        Self::MouseButtonUp { button, position: Vector::new(x, y) }
    }

    pub fn mouse_moved(x: f32, y: f32) -> Self {
        Self::MouseMoved { position: Vector::new(x, y) }
    }

    /// `true` for events where only the latest value matters.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a }, KeyDown { key: b }) => a == b,
            (KeyUp { key: a }, KeyUp { key: b }) => a == b,
            (MouseButtonDown { button: a, .. }, MouseButtonDown { button: b, .. }) => a == b,
            (MouseButtonUp { button: a, .. }, MouseButtonUp { button: b, .. }) => a == b,
            // MouseMoved: coordinates ignored, always equal
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key } | Self::KeyUp { key } => key.hash(state),
            Self::MouseButtonDown { button, .. } | Self::MouseButtonUp { button, .. } => {
                button.hash(state)
            }
            // MouseMoved and Unidentified: only discriminant matters
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
