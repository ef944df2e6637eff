//=========================================================================
// Game
//=========================================================================
//
// The contract between the engine runtime and user game code.
//
// The core loop owns the game, the input and the camera. Each tick it
// hands the game a `GameContext` borrowing the input (read-only) and the
// camera (mutable), then renders whatever `render_list()` returns.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::Input;
use crate::core::render::{Camera, Display, FrameWindow, Renderable, SharedObject};

//=== GameContext =========================================================

/// Per-call view of the engine systems a game may touch.
pub struct GameContext<'a, D: Display> {
    /// Device input, already polled for this tick.
    pub input: &'a Input,

    /// The camera; set follow targets, move it, install hooks.
    pub camera: &'a mut Camera<D>,

    /// Number of fixed updates completed before this call.
    pub tick: u64,
}

//=== Game Trait ==========================================================

/// User game logic driven by the core loop.
///
/// Only `update()` and `render_list()` are required.
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use aetheric_canvas::prelude::*;
///
/// struct Dot { position: Vector }
///
/// impl Renderable for Dot {
///     fn position(&self) -> Vector { self.position }
///     fn render(&self, frame: &mut RenderSurface, cx: f32, cy: f32, _lag: f32) {
///         frame.set_pixel((self.position.x + cx) as i32, (self.position.y + cy) as i32, Color::WHITE);
///     }
/// }
///
/// struct MyGame { objects: Vec<SharedObject> }
///
/// impl<D: Display> Game<D> for MyGame {
///     fn start(&mut self, ctx: &mut GameContext<'_, D>) {
///         ctx.camera.set_follow(&self.objects[0]);
///     }
///
///     fn update(&mut self, _ctx: &mut GameContext<'_, D>) {}
///
///     fn render_list(&self) -> &[SharedObject] {
///         &self.objects
///     }
/// }
///
/// let dot: SharedObject = Rc::new(RefCell::new(Dot { position: Vector::ZERO }));
/// let _game = MyGame { objects: vec![dot] };
/// ```
pub trait Game<D: Display> {
    /// Called once on the core thread before the first update.
    fn start(&mut self, _ctx: &mut GameContext<'_, D>) {}

    /// Advances the simulation by one fixed step.
    fn update(&mut self, ctx: &mut GameContext<'_, D>);

    /// Objects to draw this frame, back to front.
    fn render_list(&self) -> &[SharedObject];

    /// Horizontal culling predicate. Defaults to overlap with the
    /// camera's visible window.
    fn is_in_frame_x(&self, object: &dyn Renderable, frame: &FrameWindow) -> bool {
        frame.contains_x(object)
    }
}
