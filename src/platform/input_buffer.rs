//=========================================================================
// Input Buffer
//
// Collects device events between two frame boundaries, split into
// discrete and continuous events.
//
// Responsibilities:
// - Keep discrete events (key/button presses) in arrival order
// - Drop consecutive duplicates of the same discrete event (key repeat)
// - Coalesce continuous events so only the latest cursor position is sent
// - Hand everything over in one batch via `drain()`
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// `continuous` relies on `InputEvent`'s coordinate-blind hashing: two
// `MouseMoved` events are the same set entry, and `replace` keeps the
// newer one.
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Event Handling ---------------------------------------------------

    pub fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    /// Appends a discrete event unless it repeats the previous one.
    pub fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- drain() ----------------------------------------------------------
    //
    // Takes the frame's events as `(discrete, continuous)`, leaving the
    // buffer empty. Returns `None` when nothing was recorded, so that
    // idle frames send nothing.
    //
    pub fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
