//=========================================================================
// Render System
//=========================================================================
//
// Frame composition for 2D scenes.
//
// Architecture:
// ```text
//   render_list ──► FrameBounds (cull on x) ──► Renderable::render()
//                                                   │
//                                                   ▼
//   background ──► RenderSurface (fresh per frame) ◄┘
//                        │
//                        ├─► post-process hook (in place)
//                        ▼
//                    Display (clear → draw_surface → present)
// ```
//
// Components:
// - `camera`: owns position, follow target, and the per-frame surface
// - `surface`: clipped RGBA pixel buffer
// - `display`: screen abstraction and the in-memory `FrameBuffer`
// - `color`: RGBA8 color with source-over blending
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Module Declarations =================================================

mod camera;
mod color;
mod display;
mod surface;

//=== Public API ==========================================================

pub use camera::{Camera, PostProcess};
pub use color::Color;
pub use display::{Display, FrameBuffer};
pub use surface::RenderSurface;

use crate::core::Vector;

//=== Renderable Trait ====================================================

/// A world object the camera can draw and follow.
///
/// Objects paint themselves into the camera's current frame, offsetting
/// their world position by the camera position. `lag_offset` is the
/// fraction (in `[0, 1)`) of a fixed update step that has elapsed since the
/// last update, for interpolating between simulation states.
pub trait Renderable {
    /// World-space position (top-left corner).
    fn position(&self) -> Vector;

    /// Horizontal extent in world units, used for culling. Defaults to 0
    /// (a point).
    fn width(&self) -> f32 {
        0.0
    }

    fn render(&self, frame: &mut RenderSurface, camera_x: f32, camera_y: f32, lag_offset: f32);
}

/// Shared, single-thread handle to a game object.
///
/// The camera keeps only a `Weak` to its follow target; the game owns
/// these handles.
pub type SharedObject = Rc<RefCell<dyn Renderable>>;

//=== FrameBounds =========================================================

/// Visibility predicate used to cull objects before rendering.
pub trait FrameBounds {
    /// Returns `true` if `object` overlaps the visible frame on the x axis.
    fn is_in_frame_x(&self, object: &dyn Renderable) -> bool;
}

impl<F> FrameBounds for F
where
    F: Fn(&dyn Renderable) -> bool,
{
    fn is_in_frame_x(&self, object: &dyn Renderable) -> bool {
        self(object)
    }
}

//=== FrameWindow =========================================================

/// Horizontal world-space range currently shown by a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameWindow {
    /// World x of the left screen edge.
    pub left: f32,
    /// Visible width in world units.
    pub width: f32,
}

impl FrameWindow {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// `true` if `[x, x + object.width()]` intersects `[left, right]`.
    pub fn contains_x(&self, object: &dyn Renderable) -> bool {
        let x = object.position().x;
        x + object.width() >= self.left && x <= self.right()
    }
}

impl FrameBounds for FrameWindow {
    fn is_in_frame_x(&self, object: &dyn Renderable) -> bool {
        self.contains_x(object)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Block {
        position: Vector,
        width: f32,
    }

    impl Renderable for Block {
        fn position(&self) -> Vector {
            self.position
        }

        fn width(&self) -> f32 {
            self.width
        }

        fn render(&self, _: &mut RenderSurface, _: f32, _: f32, _: f32) {}
    }

    fn block(x: f32, width: f32) -> Block {
        Block { position: Vector::new(x, 0.0), width }
    }

    #[test]
    fn window_contains_object_inside() {
        let window = FrameWindow { left: 0.0, width: 100.0 };
        assert!(window.contains_x(&block(50.0, 10.0)));
    }

    #[test]
    fn window_contains_object_overlapping_left_edge() {
        let window = FrameWindow { left: 100.0, width: 100.0 };
        assert!(window.contains_x(&block(95.0, 10.0)));
        assert!(!window.contains_x(&block(80.0, 10.0)));
    }

    #[test]
    fn window_excludes_object_past_right_edge() {
        let window = FrameWindow { left: 0.0, width: 100.0 };
        assert!(window.contains_x(&block(100.0, 0.0)));
        assert!(!window.contains_x(&block(100.5, 0.0)));
    }

    #[test]
    fn closures_are_frame_bounds() {
        let only_left = |object: &dyn Renderable| object.position().x < 0.0;
        assert!(only_left.is_in_frame_x(&block(-1.0, 0.0)));
        assert!(!only_left.is_in_frame_x(&block(1.0, 0.0)));
    }
}
