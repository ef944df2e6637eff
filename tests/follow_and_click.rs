//=========================================================================
// Integration: input → world coordinates → camera frame
//=========================================================================
//
// Drives the public building blocks by hand the way the core loop does:
// platform batches go through the hub, the player moves, the camera
// recenters and composes a frame into an in-memory display.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use aetheric_canvas::prelude::*;

//--- Test Helpers --------------------------------------------------------

const PLAYER: Color = Color::rgb(0, 200, 0);
const CRATE: Color = Color::rgb(150, 100, 50);
const SKY: Color = Color::rgb(20, 20, 40);

struct Block {
    position: Vector,
    size: u32,
    color: Color,
}

impl Renderable for Block {
    fn position(&self) -> Vector {
        self.position
    }

    fn width(&self) -> f32 {
        self.size as f32
    }

    fn render(&self, frame: &mut RenderSurface, camera_x: f32, camera_y: f32, _lag: f32) {
        let x = (self.position.x + camera_x) as i32;
        let y = (self.position.y + camera_y) as i32;
        frame.set_pixels(self.color, x, y, self.size, self.size);
    }
}

fn block(x: f32, y: f32, size: u32, color: Color) -> Rc<RefCell<Block>> {
    Rc::new(RefCell::new(Block { position: Vector::new(x, y), size, color }))
}

fn send(hub: &EventHub, discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) {
    hub.dispatch(PlatformEvent::Inputs { discrete, continuous });
}

//=========================================================================
// Scenario
//=========================================================================

#[test]
fn player_walks_right_and_clicks_a_crate() {
    let hub = EventHub::new(16);
    let mut input = Input::new();
    assert!(input.start(&hub));

    let player = block(0.0, 0.0, 2, PLAYER);
    let near_crate = block(30.0, 0.0, 4, CRATE);
    let far_crate = block(500.0, 0.0, 4, CRATE);

    let player_obj: SharedObject = player.clone();
    let near_obj: SharedObject = near_crate.clone();
    let far_obj: SharedObject = far_crate;
    let render_list = vec![player_obj.clone(), near_obj, far_obj];

    let mut camera = Camera::new(FrameBuffer::new(40, 20), SKY);
    camera.set_follow(&player_obj);

    //--- Hold "d" for 20 ticks ------------------------------------------
    send(&hub, vec![InputEvent::key_down("d")], vec![]);
    for _ in 0..20 {
        assert_eq!(input.poll(), TickControl::Continue);
        if input.is_key_down("d") {
            player.borrow_mut().position.x += 1.0;
        }
        camera.update();
    }
    send(&hub, vec![InputEvent::key_up("d")], vec![]);
    input.poll();

    assert_eq!(input.keystrokes().get("d"), Some(&false));
    assert_eq!(player.borrow().position, Vector::new(20.0, 0.0));
    assert_eq!(camera.position(), Vector::new(0.0, 10.0));

    //--- Compose a frame -------------------------------------------------
    let window = camera.frame_window();
    camera.render(&render_list, 0.0, &window);

    let screen = camera.display().screen();
    assert_eq!(screen.pixel(20, 10), Some(PLAYER));
    assert_eq!(screen.pixel(30, 10), Some(CRATE));
    assert_eq!(screen.pixel(0, 0), Some(SKY));

    //--- Click on the near crate ----------------------------------------
    let left = Input::button_to_code("left").expect("left is a known button");
    send(
        &hub,
        vec![InputEvent::mouse_down(left, 31.0, 11.0)],
        vec![InputEvent::mouse_moved(31.0, 11.0)],
    );
    input.poll();

    let record = input.button_down()[&left];
    assert!(record.clicked);

    let world = Input::screen_to_world_position(record.position, camera.position());
    let crate_pos = near_crate.borrow().position;
    assert!(world.x >= crate_pos.x && world.x < crate_pos.x + 4.0);
    assert!(world.y >= crate_pos.y && world.y < crate_pos.y + 4.0);
    assert_eq!(input.mouse_world_position(camera.position()), world);
}

#[test]
fn closing_the_window_stops_polling() {
    let hub = EventHub::new(4);
    let mut input = Input::new();
    input.start(&hub);

    send(&hub, vec![InputEvent::key_down("x")], vec![]);
    hub.dispatch(PlatformEvent::WindowClosed);

    assert_eq!(input.poll(), TickControl::Exit);
    assert!(input.is_key_down("x"));
}

#[test]
fn frame_can_be_saved_as_png() {
    let mut camera = Camera::new(FrameBuffer::new(8, 8), SKY);
    let object: SharedObject = block(2.0, 2.0, 4, PLAYER);
    camera.set_post_process(|frame| frame.set_pixel(0, 0, Color::WHITE));

    camera.render(&[object], 0.0, &|_: &dyn Renderable| true);

    let path = std::env::temp_dir().join(format!("aetheric_canvas_{}.png", std::process::id()));
    camera.display().save(&path).expect("png written");

    let decoded = image::open(&path).expect("png readable").to_rgba8();
    std::fs::remove_file(&path).ok();

    assert_eq!(Color::from(*decoded.get_pixel(0, 0)), Color::WHITE);
    assert_eq!(Color::from(*decoded.get_pixel(3, 3)), PLAYER);
    assert_eq!(Color::from(*decoded.get_pixel(7, 7)), SKY);
}
