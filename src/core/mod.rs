//=========================================================================
// Core Loop
//
// Central coordinator for the systems running on the logic (non-platform)
// thread: input, game logic and the camera.
//
// Responsibilities:
// - Drain platform input each iteration
// - Advance the game in fixed steps (TPS), recentering the camera after
//   each step
// - Render once per iteration with the leftover fraction of a step as the
//   interpolation offset
//
// Notes:
// The core loop runs independently from the platform layer and owns every
// system it drives. Communication with the platform occurs only through
// the event hub's channels. Nothing here needs to be `Send` except what
// crosses into the thread at spawn time (input, display, game factory).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use log::{info, warn};

//=== Public Modules ======================================================

pub mod game;
pub mod input;
pub mod platform_bridge;
pub mod render;

mod vector;

pub use vector::Vector;

//=== Internal Imports ====================================================

use game::{Game, GameContext};
use input::Input;
use platform_bridge::TickControl;
use render::{Camera, Color, Display, Renderable};

//=== CoreLoop ============================================================
//
// Fixed-timestep loop: updates run at exactly `step` intervals of game
// time; rendering happens once per iteration with `lag / step` in [0, 1).
//
pub(crate) struct CoreLoop<D: Display, G: Game<D>> {
    input: Input,
    camera: Camera<D>,
    game: G,
    step: Duration,
    lag: Duration,
    tick: u64,
}

impl<D: Display, G: Game<D>> CoreLoop<D, G> {
    /// Updates allowed per iteration before the backlog is dropped.
    const MAX_CATCH_UP_STEPS: u32 = 8;

    //--- Construction -----------------------------------------------------
    pub fn new(input: Input, camera: Camera<D>, game: G, tps: f64) -> Self {
        Self {
            input,
            camera,
            game,
            step: Duration::from_secs_f64(1.0 / tps),
            lag: Duration::ZERO,
            tick: 0,
        }
    }

    //--- spawn() ----------------------------------------------------------
    //
    // Spawns the logic thread. The game and camera are built on that
    // thread, so they may hold `Rc`/`RefCell` freely.
    //
    // `input` should already be started so that no event dispatched
    // before the thread is scheduled gets lost.
    //
    pub fn spawn<F>(
        input: Input,
        display: D,
        background: Color,
        tps: f64,
        factory: F,
    ) -> thread::JoinHandle<()>
    where
        D: Send + 'static,
        G: 'static,
        F: FnOnce() -> G + Send + 'static,
    {
        thread::spawn(move || {
            let camera = Camera::new(display, background);
            let mut core = Self::new(input, camera, factory(), tps);

            core.start();
            core.run();
        })
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn start(&mut self) {
        info!("Starting game (step: {:?})", self.step);
        let mut ctx = GameContext {
            input: &self.input,
            camera: &mut self.camera,
            tick: self.tick,
        };
        self.game.start(&mut ctx);
    }

    //--- run() ------------------------------------------------------------
    //
    // Blocks until the platform closes the window or disconnects.
    //
    // Each iteration:
    //  1. Measures time since the previous iteration
    //  2. Ticks (input → fixed updates → render)
    //  3. Sleeps out the remainder of the step
    //
    pub fn run(&mut self) {
        let mut previous = Instant::now();

        loop {
            let frame_start = Instant::now();
            let elapsed = frame_start - previous;
            previous = frame_start;

            if let TickControl::Exit = self.tick(elapsed) {
                info!("Core thread exiting.");
                break;
            }

            let busy = frame_start.elapsed();
            if busy < self.step {
                thread::sleep(self.step - busy);
            }
        }
    }

    //--- tick() -----------------------------------------------------------
    //
    // One loop iteration given the wall time elapsed since the last one.
    //
    pub fn tick(&mut self, elapsed: Duration) -> TickControl {
        //--- Step 1: Gather platform input --------------------------------
        if let TickControl::Exit = self.input.poll() {
            return TickControl::Exit;
        }

        //--- Step 2: Fixed updates ----------------------------------------
        self.lag += elapsed;
        let mut steps = 0;
        while self.lag >= self.step {
            if steps == Self::MAX_CATCH_UP_STEPS {
                warn!("Update backlog of {:?}, skipping ahead", self.lag);
                self.lag = Duration::ZERO;
                break;
            }
            self.update_once();
            self.lag -= self.step;
            steps += 1;
        }

        //--- Step 3: Render -----------------------------------------------
        let lag_offset = self.lag.as_secs_f32() / self.step.as_secs_f32();
        self.render(lag_offset);

        TickControl::Continue
    }

    //--- Internal Helpers -------------------------------------------------

    fn update_once(&mut self) {
        let mut ctx = GameContext {
            input: &self.input,
            camera: &mut self.camera,
            tick: self.tick,
        };
        self.game.update(&mut ctx);
        self.camera.update();
        self.tick += 1;
    }

    fn render(&mut self, lag_offset: f32) {
        let window = self.camera.frame_window();
        let game = &self.game;
        let bounds = |object: &dyn Renderable| game.is_in_frame_x(object, &window);
        self.camera.render(game.render_list(), lag_offset, &bounds);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn camera(&self) -> &Camera<D> {
        &self.camera
    }

    #[cfg(test)]
    pub(crate) fn game(&self) -> &G {
        &self.game
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
