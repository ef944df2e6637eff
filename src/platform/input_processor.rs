//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputBuffer
//
// Keys are named by the logical key, i.e. what the key produces under the
// active layout ("a", "A", "ArrowLeft", " "). Dead and unidentified keys
// are filtered (returns None).
//
// Stateful cursor tracking: Winit reports button events without a
// position, so the last `CursorMoved` position is cached and attached to
// every subsequent button event.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{Key, NamedKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::Vector;

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents with cursor tracking.
pub(crate) struct InputProcessor {
    cursor: Vector,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { cursor: Vector::ZERO }
    }

    /// Last cursor position seen.
    #[cfg(test)]
    pub(crate) fn cursor(&self) -> Vector {
        self.cursor
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent to an InputEvent (filters unnamed keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.process_key(&key_event.logical_key, key_event.state)
    }

    /// Converts a Winit mouse button event, stamped with the cursor position.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = button_code(button);
        let position = self.cursor;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, position },
            ElementState::Released => InputEvent::MouseButtonUp { button, position },
        }
    }

    /// Records the cursor position and creates a mouse move event.
    pub(crate) fn process_mouse_move(&mut self, x: f32, y: f32) -> InputEvent {
        self.cursor = Vector::new(x, y);
        InputEvent::MouseMoved { position: self.cursor }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_key(&self, key: &Key, state: ElementState) -> Option<InputEvent> {
        let key = key_name(key)?;

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Name of a logical key, or `None` for keys without a stable name.
///
/// Characters map to themselves, Space to `" "`, other named keys to
/// their variant name (`"Enter"`, `"ArrowUp"`, `"F5"`...).
pub(crate) fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_string()),
        Key::Named(NamedKey::Space) => Some(" ".to_owned()),
        Key::Named(named) => Some(format!("{:?}", named)),
        Key::Dead(_) | Key::Unidentified(_) => None,
    }
}

/// Numeric button code: Left 0, Middle 1, Right 2, Back 3, Forward 4,
/// `Other(n)` n.
pub(crate) fn button_code(button: WinitMouseButton) -> u16 {
    match button {
        WinitMouseButton::Left => 0,
        WinitMouseButton::Middle => 1,
        WinitMouseButton::Right => 2,
        WinitMouseButton::Back => 3,
        WinitMouseButton::Forward => 4,
        WinitMouseButton::Other(code) => code,
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;
    use winit::keyboard::NativeKey;

    //=====================================================================
    // Key Names
    //=====================================================================

    #[test]
    fn character_keys_keep_their_text() {
        assert_eq!(key_name(&Key::Character("a".into())), Some("a".to_owned()));
        assert_eq!(key_name(&Key::Character("A".into())), Some("A".to_owned()));
    }

    #[test]
    fn space_is_a_single_blank() {
        assert_eq!(key_name(&Key::Named(NamedKey::Space)), Some(" ".to_owned()));
    }

    #[test]
    fn named_keys_use_variant_name() {
        assert_eq!(
            key_name(&Key::Named(NamedKey::ArrowLeft)),
            Some("ArrowLeft".to_owned())
        );
        assert_eq!(key_name(&Key::Named(NamedKey::Enter)), Some("Enter".to_owned()));
    }

    #[test]
    fn dead_and_unidentified_keys_are_filtered() {
        assert_eq!(key_name(&Key::Dead(Some('`'))), None);
        assert_eq!(key_name(&Key::Unidentified(NativeKey::Unidentified)), None);
    }

    #[test]
    fn key_press_and_release() {
        let processor = InputProcessor::new();
        let key = Key::Character("w".into());

        assert_eq!(
            processor.process_key(&key, ElementState::Pressed),
            Some(InputEvent::key_down("w"))
        );
        assert_eq!(
            processor.process_key(&key, ElementState::Released),
            Some(InputEvent::key_up("w"))
        );
    }

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn button_codes_match_engine_names() {
        assert_eq!(button_code(WinitMouseButton::Left), MouseButton::Left.code());
        assert_eq!(button_code(WinitMouseButton::Middle), MouseButton::Middle.code());
        assert_eq!(button_code(WinitMouseButton::Right), MouseButton::Right.code());
    }

    #[test]
    fn extra_button_codes() {
        assert_eq!(button_code(WinitMouseButton::Back), 3);
        assert_eq!(button_code(WinitMouseButton::Forward), 4);
        assert_eq!(button_code(WinitMouseButton::Other(9)), 9);
    }

    #[test]
    fn mouse_move_updates_cursor() {
        let mut processor = InputProcessor::new();
        let event = processor.process_mouse_move(123.5, 456.7);

        match event {
            InputEvent::MouseMoved { position } => {
                assert_eq!(position, Vector::new(123.5, 456.7));
            }
            _ => panic!("Expected MouseMoved"),
        }
        assert_eq!(processor.cursor(), Vector::new(123.5, 456.7));
    }

    #[test]
    fn button_events_carry_last_cursor_position() {
        let mut processor = InputProcessor::new();
        processor.process_mouse_move(40.0, 30.0);

        let down = processor.process_mouse_button(WinitMouseButton::Right, ElementState::Pressed);
        processor.process_mouse_move(41.0, 31.0);
        let up = processor.process_mouse_button(WinitMouseButton::Right, ElementState::Released);

        match (down, up) {
            (
                InputEvent::MouseButtonDown { button: 2, position: p1 },
                InputEvent::MouseButtonUp { button: 2, position: p2 },
            ) => {
                assert_eq!(p1, Vector::new(40.0, 30.0));
                assert_eq!(p2, Vector::new(41.0, 31.0));
            }
            other => panic!("Unexpected events {:?}", other),
        }
    }

    #[test]
    fn button_before_any_move_is_at_origin() {
        let processor = InputProcessor::new();
        match processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed) {
            InputEvent::MouseButtonDown { position, .. } => assert_eq!(position, Vector::ZERO),
            other => panic!("Expected MouseButtonDown, got {:?}", other),
        }
    }
}
