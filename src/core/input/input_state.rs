//=========================================================================
// Input State
//=========================================================================
//
// Owned keyboard/mouse state built from device events.
//
// Architecture:
//   InputEvent → apply() → keystrokes / button_down / mouse_position → query
//
// Entries are upserted and never removed: a key pressed once stays in the
// map with `false` after release. Key names are stored lowercase.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, MouseButton};
use crate::core::Vector;

//=== ButtonRecord ========================================================

/// Last known state of one mouse button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonRecord {
    /// Cursor position of the last press or release.
    pub position: Vector,

    /// `true` after a press, `false` after a release.
    pub clicked: bool,
}

//=== InputState ==========================================================

#[derive(Debug, Clone, Default)]
pub struct InputState {
    keystrokes: HashMap<String, bool>,
    button_down: HashMap<u16, ButtonRecord>,
    mouse_position: Vector,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    pub fn apply_all(&mut self, events: &[InputEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key } => {
                self.keystrokes.insert(key.to_lowercase(), true);
            }

            InputEvent::KeyUp { key } => {
                self.keystrokes.insert(key.to_lowercase(), false);
            }

            InputEvent::MouseButtonDown { button, position } => {
                self.button_down.insert(
                    *button,
                    ButtonRecord { position: *position, clicked: true },
                );
            }

            InputEvent::MouseButtonUp { button, position } => {
                self.button_down.insert(
                    *button,
                    ButtonRecord { position: *position, clicked: false },
                );
            }

            InputEvent::MouseMoved { position } => {
                self.mouse_position = *position;
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Every key seen so far and whether it is currently down.
    pub fn keystrokes(&self) -> &HashMap<String, bool> {
        &self.keystrokes
    }

    /// `None` if `key` was never pressed, otherwise its pressed state.
    /// Lookup is case-insensitive.
    pub fn keystroke(&self, key: &str) -> Option<bool> {
        self.keystrokes.get(&key.to_lowercase()).copied()
    }

    /// `true` while `key` is held. Never-pressed keys are up.
    pub fn is_key_down(&self, key: &str) -> bool {
        self.keystroke(key).unwrap_or(false)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    /// Every button seen so far, keyed by numeric code.
    pub fn button_down(&self) -> &HashMap<u16, ButtonRecord> {
        &self.button_down
    }

    pub fn button_record(&self, code: u16) -> Option<ButtonRecord> {
        self.button_down.get(&code).copied()
    }

    pub fn button(&self, button: MouseButton) -> Option<ButtonRecord> {
        self.button_record(button.code())
    }

    /// `true` while the button with `code` is held.
    pub fn is_button_down(&self, code: u16) -> bool {
        self.button_record(code).is_some_and(|record| record.clicked)
    }

    /// Last cursor position in screen space.
    pub fn mouse_position(&self) -> Vector {
        self.mouse_position
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
