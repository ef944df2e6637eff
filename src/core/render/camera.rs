//=========================================================================
// Camera
//=========================================================================
//
// Composes the visible frame from a list of world objects and keeps a
// followed object centered on screen.
//
// Frame lifecycle (`render`):
//   clear display → fresh surface → background fill → cull + draw objects
//   → post-process hook → blit to display → present
//
// The surface is rebuilt from scratch each call; `current_frame()` stays
// valid until the next `render`.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::rc::{Rc, Weak};
use std::cell::RefCell;

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::{Color, Display, FrameBounds, FrameWindow, RenderSurface, Renderable, SharedObject};
use crate::core::Vector;

//=== PostProcess =========================================================

/// Hook run on every composed frame before it reaches the display
/// (lighting, vignette, color grading...).
pub type PostProcess = Box<dyn FnMut(&mut RenderSurface)>;

fn no_post_process() -> PostProcess {
    Box::new(|_| {})
}

//=== Camera ==============================================================

/// 2D camera bound to a [`Display`].
///
/// The camera position is the offset added to world coordinates to obtain
/// screen coordinates, so following an object at `p` sets the position to
/// `-p + viewport / 2`.
pub struct Camera<D: Display> {
    display: D,
    background: Color,
    position: Vector,
    follow: Option<Weak<RefCell<dyn Renderable>>>,
    current_frame: RenderSurface,
    post_process: PostProcess,
}

impl<D: Display> Camera<D> {
    //--- Construction -----------------------------------------------------

    /// Creates a camera at the origin, following nothing.
    pub fn new(display: D, background: Color) -> Self {
        let current_frame = RenderSurface::new(0, 0, display.width(), display.height());
        debug!(
            target: "camera",
            "Camera created ({}x{} viewport)",
            display.width(),
            display.height()
        );

        Self {
            display,
            background,
            position: Vector::ZERO,
            follow: None,
            current_frame,
            post_process: no_post_process(),
        }
    }

    /// Sets the initial position (builder style).
    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    //--- Frame Composition ------------------------------------------------

    /// Composes a frame from `render_list` and draws it to the display.
    ///
    /// Objects for which `bounds` reports "not in frame" are skipped
    /// entirely. An object that is already mutably borrowed elsewhere is
    /// skipped with a warning.
    pub fn render<B>(&mut self, render_list: &[SharedObject], lag_offset: f32, bounds: &B)
    where
        B: FrameBounds + ?Sized,
    {
        let (width, height) = self.viewport();

        self.display.clear();

        self.current_frame = RenderSurface::new(0, 0, width, height);
        self.current_frame.set_pixels(self.background, 0, 0, width, height);

        let mut drawn = 0usize;
        for object in render_list {
            let Ok(object) = object.try_borrow() else {
                warn!(target: "camera", "Skipping object already borrowed mutably");
                continue;
            };

            if bounds.is_in_frame_x(&*object) {
                object.render(
                    &mut self.current_frame,
                    self.position.x,
                    self.position.y,
                    lag_offset,
                );
                drawn += 1;
            }
        }

        (self.post_process)(&mut self.current_frame);

        let (x, y) = (self.current_frame.x(), self.current_frame.y());
        self.display.draw_surface(&self.current_frame, x, y);
        self.display.present();

        trace!(
            target: "camera",
            "Frame composed: {}/{} objects drawn",
            drawn,
            render_list.len()
        );
    }

    /// Recenters on the follow target, if any.
    ///
    /// A target that has been dropped is forgotten; a target currently
    /// borrowed mutably is skipped for this update.
    pub fn update(&mut self) {
        let Some(weak) = &self.follow else {
            return;
        };

        let Some(target) = weak.upgrade() else {
            debug!(target: "camera", "Follow target dropped, clearing follow");
            self.follow = None;
            return;
        };

        let Ok(target) = target.try_borrow() else {
            warn!(target: "camera", "Follow target borrowed mutably, skipping update");
            return;
        };

        let (width, height) = self.viewport();
        let half = Vector::new(width as f32 / 2.0, height as f32 / 2.0);
        self.position = -target.position() + half;
    }

    /// World-space horizontal range currently on screen.
    pub fn frame_window(&self) -> FrameWindow {
        FrameWindow {
            left: -self.position.x,
            width: self.display.width() as f32,
        }
    }

    //--- Follow Target ----------------------------------------------------

    /// Returns the follow target if it is still alive.
    pub fn follow(&self) -> Option<SharedObject> {
        self.follow.as_ref().and_then(Weak::upgrade)
    }

    /// Starts following `target`. The camera does not keep it alive.
    pub fn set_follow(&mut self, target: &SharedObject) {
        self.follow = Some(Rc::downgrade(target));
    }

    pub fn clear_follow(&mut self) {
        self.follow = None;
    }

    //--- Position ---------------------------------------------------------

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    //--- Frame & Hook -----------------------------------------------------

    /// The most recently composed frame.
    pub fn current_frame(&self) -> &RenderSurface {
        &self.current_frame
    }

    pub fn set_post_process<F>(&mut self, hook: F)
    where
        F: FnMut(&mut RenderSurface) + 'static,
    {
        self.post_process = Box::new(hook);
    }

    /// Installs `hook` and returns the previous one.
    pub fn replace_post_process(&mut self, hook: PostProcess) -> PostProcess {
        std::mem::replace(&mut self.post_process, hook)
    }

    /// Restores the default no-op hook.
    pub fn clear_post_process(&mut self) {
        self.post_process = no_post_process();
    }

    //--- Display ----------------------------------------------------------

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Viewport size in pixels (the display size).
    pub fn viewport(&self) -> (u32, u32) {
        (self.display.width(), self.display.height())
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::FrameBuffer;
    use std::cell::Cell;

    //--- Test Helpers -----------------------------------------------------

    const SKY: Color = Color::rgb(30, 60, 90);
    const RED: Color = Color::rgb(255, 0, 0);

    /// 2x2 red square that counts its render calls.
    struct Square {
        position: Vector,
        renders: Cell<u32>,
        last_lag: Cell<f32>,
    }

    impl Square {
        fn at(x: f32, y: f32) -> Self {
            Self {
                position: Vector::new(x, y),
                renders: Cell::new(0),
                last_lag: Cell::new(-1.0),
            }
        }
    }

    impl Renderable for Square {
        fn position(&self) -> Vector {
            self.position
        }

        fn width(&self) -> f32 {
            2.0
        }

        fn render(&self, frame: &mut RenderSurface, camera_x: f32, camera_y: f32, lag_offset: f32) {
            self.renders.set(self.renders.get() + 1);
            self.last_lag.set(lag_offset);
            let x = (self.position.x + camera_x) as i32;
            let y = (self.position.y + camera_y) as i32;
            frame.set_pixels(RED, x, y, 2, 2);
        }
    }

    fn shared(square: Square) -> (Rc<RefCell<Square>>, SharedObject) {
        let typed = Rc::new(RefCell::new(square));
        let object: SharedObject = typed.clone();
        (typed, object)
    }

    fn camera(width: u32, height: u32) -> Camera<FrameBuffer> {
        Camera::new(FrameBuffer::new(width, height), SKY)
    }

    fn everything(_: &dyn Renderable) -> bool {
        true
    }

    fn nothing(_: &dyn Renderable) -> bool {
        false
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn new_camera_defaults() {
        let cam = camera(64, 32);
        assert_eq!(cam.position(), Vector::ZERO);
        assert!(cam.follow().is_none());
        assert_eq!(cam.viewport(), (64, 32));
        assert_eq!(cam.background(), SKY);
        assert_eq!(cam.current_frame().width(), 64);
    }

    #[test]
    fn with_position_sets_start() {
        let cam = camera(10, 10).with_position(Vector::new(3.0, 4.0));
        assert_eq!(cam.position(), Vector::new(3.0, 4.0));
    }

    //=====================================================================
    // Render
    //=====================================================================

    /// Empty list still produces a full background frame and one hook call.
    #[test]
    fn render_empty_list_fills_background_and_runs_hook_once() {
        let mut cam = camera(8, 6);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        cam.set_post_process(move |_| seen.set(seen.get() + 1));

        cam.render(&[], 0.0, &everything);

        assert_eq!(calls.get(), 1);
        let frame = cam.current_frame();
        assert!(frame.pixels().pixels().all(|p| Color::from(*p) == SKY));
        assert_eq!(cam.display().screen().pixel(7, 5), Some(SKY));
        assert_eq!(cam.display().frames_presented(), 1);
    }

    #[test]
    fn render_draws_visible_objects_with_camera_offset() {
        let mut cam = camera(10, 10);
        cam.set_position(Vector::new(2.0, 3.0));
        let (square, object) = shared(Square::at(1.0, 1.0));

        cam.render(&[object], 0.25, &everything);

        assert_eq!(square.borrow().renders.get(), 1);
        assert_eq!(square.borrow().last_lag.get(), 0.25);
        assert_eq!(cam.current_frame().pixel(3, 4), Some(RED));
        assert_eq!(cam.current_frame().pixel(1, 1), Some(SKY));
        assert_eq!(cam.display().screen().pixel(4, 5), Some(RED));
    }

    #[test]
    fn render_never_draws_culled_objects() {
        let mut cam = camera(10, 10);
        let (square, object) = shared(Square::at(0.0, 0.0));

        cam.render(&[object], 0.0, &nothing);

        assert_eq!(square.borrow().renders.get(), 0);
        assert!(cam
            .current_frame()
            .pixels()
            .pixels()
            .all(|p| Color::from(*p) == SKY));
    }

    #[test]
    fn render_with_frame_window_culls_offscreen_objects() {
        let mut cam = camera(10, 10);
        let (visible, a) = shared(Square::at(5.0, 0.0));
        let (offscreen, b) = shared(Square::at(50.0, 0.0));

        let window = cam.frame_window();
        cam.render(&[a, b], 0.0, &window);

        assert_eq!(visible.borrow().renders.get(), 1);
        assert_eq!(offscreen.borrow().renders.get(), 0);
    }

    #[test]
    fn render_replaces_frame_each_call() {
        let mut cam = camera(4, 4);
        let (_square, object) = shared(Square::at(0.0, 0.0));

        cam.render(&[object], 0.0, &everything);
        assert_eq!(cam.current_frame().pixel(0, 0), Some(RED));

        cam.render(&[], 0.0, &everything);
        assert_eq!(cam.current_frame().pixel(0, 0), Some(SKY));
        assert_eq!(cam.display().screen().pixel(0, 0), Some(SKY));
    }

    #[test]
    fn post_process_sees_composed_frame_and_mutates_it() {
        let mut cam = camera(4, 4);
        let (_square, object) = shared(Square::at(0.0, 0.0));
        cam.set_post_process(|frame| {
            assert_eq!(frame.pixel(0, 0), Some(RED));
            frame.set_pixel(3, 3, Color::WHITE);
        });

        cam.render(&[object], 0.0, &everything);

        assert_eq!(cam.display().screen().pixel(3, 3), Some(Color::WHITE));
    }

    #[test]
    fn replace_and_clear_post_process() {
        let mut cam = camera(2, 2);
        cam.set_post_process(|frame| frame.fill(Color::WHITE));

        let previous = cam.replace_post_process(Box::new(|frame| frame.fill(RED)));
        cam.render(&[], 0.0, &everything);
        assert_eq!(cam.current_frame().pixel(0, 0), Some(RED));

        cam.replace_post_process(previous);
        cam.render(&[], 0.0, &everything);
        assert_eq!(cam.current_frame().pixel(0, 0), Some(Color::WHITE));

        cam.clear_post_process();
        cam.render(&[], 0.0, &everything);
        assert_eq!(cam.current_frame().pixel(0, 0), Some(SKY));
    }

    #[test]
    fn render_skips_mutably_borrowed_object() {
        let mut cam = camera(4, 4);
        let (square, object) = shared(Square::at(0.0, 0.0));

        let _guard = square.borrow_mut();
        cam.render(&[object], 0.0, &everything);

        assert_eq!(cam.current_frame().pixel(0, 0), Some(SKY));
    }

    //=====================================================================
    // Update / Follow
    //=====================================================================

    #[test]
    fn update_centers_follow_target() {
        let mut cam = camera(800, 600);
        let (_square, object) = shared(Square::at(100.0, 50.0));

        cam.set_follow(&object);
        cam.update();

        assert_eq!(cam.position(), Vector::new(-100.0 + 400.0, -50.0 + 300.0));
    }

    #[test]
    fn update_tracks_moving_target() {
        let mut cam = camera(100, 100);
        let (square, object) = shared(Square::at(0.0, 0.0));
        cam.set_follow(&object);

        square.borrow_mut().position = Vector::new(30.0, -20.0);
        cam.update();

        assert_eq!(cam.position(), Vector::new(20.0, 70.0));
    }

    #[test]
    fn update_without_follow_is_noop() {
        let mut cam = camera(100, 100).with_position(Vector::new(7.0, 8.0));
        cam.update();
        assert_eq!(cam.position(), Vector::new(7.0, 8.0));
    }

    #[test]
    fn camera_does_not_keep_target_alive() {
        let mut cam = camera(100, 100).with_position(Vector::new(1.0, 1.0));
        let (square, object) = shared(Square::at(10.0, 10.0));
        cam.set_follow(&object);
        assert!(cam.follow().is_some());

        drop(object);
        drop(square);
        cam.update();

        assert!(cam.follow().is_none());
        assert_eq!(cam.position(), Vector::new(1.0, 1.0));
    }

    #[test]
    fn clear_follow_stops_tracking() {
        let mut cam = camera(100, 100);
        let (_square, object) = shared(Square::at(10.0, 10.0));
        cam.set_follow(&object);
        cam.clear_follow();
        cam.update();
        assert_eq!(cam.position(), Vector::ZERO);
    }

    #[test]
    fn frame_window_tracks_position() {
        let mut cam = camera(200, 100);
        cam.set_position(Vector::new(-50.0, 0.0));
        let window = cam.frame_window();
        assert_eq!(window.left, 50.0);
        assert_eq!(window.right(), 250.0);
    }
}
