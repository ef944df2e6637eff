//=========================================================================
// Display
//=========================================================================
//
// The physical drawing target a camera presents to.
//
// Backends (a softbuffer window, a canvas, a test recorder) implement
// `Display`; `FrameBuffer` is the in-memory implementation shipped with
// the crate, used for headless runs and screenshots.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::Path;

//=== External Dependencies ===============================================

use image::ImageResult;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{Color, RenderSurface};

//=== Display Trait =======================================================

/// A screen the camera can draw composed frames onto.
pub trait Display {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Clears the whole display.
    fn clear(&mut self);

    /// Copies `surface` onto the display with its top-left at `(x, y)`.
    fn draw_surface(&mut self, surface: &RenderSurface, x: i32, y: i32);

    /// Makes the drawn contents visible. Default does nothing, for
    /// backends where drawing is already immediate.
    fn present(&mut self) {}
}

//=== FrameBuffer =========================================================

/// In-memory [`Display`] backed by an RGBA image.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    screen: RenderSurface,
    frames_presented: u64,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: RenderSurface::new(0, 0, width, height),
            frames_presented: 0,
        }
    }

    /// Current screen contents.
    pub fn screen(&self) -> &RenderSurface {
        &self.screen
    }

    /// Number of `present()` calls so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Writes the current screen to `path`. Format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        debug!(target: "display", "Saving frame to {}", path.as_ref().display());
        self.screen.pixels().save(path)
    }
}

impl Display for FrameBuffer {
    fn width(&self) -> u32 {
        self.screen.width()
    }

    fn height(&self) -> u32 {
        self.screen.height()
    }

    fn clear(&mut self) {
        self.screen.fill(Color::TRANSPARENT);
    }

    fn draw_surface(&mut self, surface: &RenderSurface, x: i32, y: i32) {
        self.screen.draw_surface(surface, x, y);
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
