use std::time::Duration;

use cgmath::{InnerSpace, Point3, Vector3};
use rt_render::{
    camera::{Camera, CameraController, CameraMovement},
    driver::{FrameDriver, KeyBindings, PressLatch, RunState},
    input::KeyStates,
    light::{LightOrbit, PointLight},
    renderer::CameraEventHandler,
};
use winit::keyboard::KeyCode;

#[derive(Default)]
struct CountingHandler {
    samples: u32,
}

impl CameraEventHandler for CountingHandler {
    fn keyboard_events(&mut self, _keys: &KeyStates) {
        self.samples += 1;
    }

    fn tick_update_camera(&mut self, _camera: &mut Camera, _dt: Duration) {}
}

fn frames(driver: &mut FrameDriver, keys: &KeyStates, count: usize) {
    let mut handler = CountingHandler::default();
    for _ in 0..count {
        driver.process_input(keys, &mut handler);
    }
}

#[test]
fn should_fire_latch_once_per_press() {
    let mut latch = PressLatch::default();
    assert!(latch.rising_edge(true));
    assert!(latch.is_latched());
    assert!(!latch.rising_edge(true));
    assert!(!latch.rising_edge(true));
    assert!(!latch.rising_edge(false));
    assert!(!latch.is_latched());
    assert!(latch.rising_edge(true));
}

#[test]
fn should_toggle_pause_once_while_held() {
    let mut driver = FrameDriver::new(KeyBindings::shadows());
    let mut keys = KeyStates::new();
    assert_eq!(driver.run_state(), RunState::Running);

    keys.press(KeyCode::KeyP);
    frames(&mut driver, &keys, 30);
    assert_eq!(driver.run_state(), RunState::Paused);
    assert!(!driver.is_running());

    keys.release(KeyCode::KeyP);
    frames(&mut driver, &keys, 5);
    assert_eq!(driver.run_state(), RunState::Paused);

    keys.press(KeyCode::KeyP);
    frames(&mut driver, &keys, 3);
    assert_eq!(driver.run_state(), RunState::Running);
}

#[test]
fn should_toggle_shadows_with_space() {
    let mut driver = FrameDriver::new(KeyBindings::shadows());
    let mut keys = KeyStates::new();
    assert!(driver.shadows_enabled());

    keys.press(KeyCode::Space);
    frames(&mut driver, &keys, 10);
    assert!(!driver.shadows_enabled());

    keys.release(KeyCode::Space);
    frames(&mut driver, &keys, 1);
    keys.press(KeyCode::Space);
    frames(&mut driver, &keys, 1);
    assert!(driver.shadows_enabled());
    // Pausing is independent of shadows.
    assert!(driver.is_running());
}

#[test]
fn should_ignore_unbound_actions() {
    let mut driver = FrameDriver::new(KeyBindings::viewer());
    let mut keys = KeyStates::new();
    keys.press(KeyCode::KeyP);
    keys.press(KeyCode::Space);
    frames(&mut driver, &keys, 3);
    assert!(driver.is_running());
    assert!(driver.shadows_enabled());
    assert!(!driver.should_close());
}

#[test]
fn should_close_on_escape() {
    let mut driver = FrameDriver::new(KeyBindings::viewer());
    let mut keys = KeyStates::new();
    frames(&mut driver, &keys, 1);
    assert!(!driver.should_close());

    keys.press(KeyCode::Escape);
    frames(&mut driver, &keys, 1);
    assert!(driver.should_close());

    // Closing sticks even after the key is released.
    keys.release(KeyCode::Escape);
    frames(&mut driver, &keys, 1);
    assert!(driver.should_close());
}

#[test]
fn should_sample_camera_keys_every_frame_even_when_paused() {
    let mut driver = FrameDriver::new(KeyBindings::shadows());
    let mut keys = KeyStates::new();
    keys.press(KeyCode::KeyP);
    let mut handler = CountingHandler::default();
    for _ in 0..4 {
        driver.process_input(&keys, &mut handler);
    }
    assert_eq!(driver.run_state(), RunState::Paused);
    assert_eq!(handler.samples, 4);
}

#[test]
fn should_move_camera_through_controller() {
    let mut driver = FrameDriver::new(KeyBindings::shadows());
    let mut controller = CameraController::new();
    let mut camera = Camera::looking_forward(Point3::new(0.0, 0.0, 2.0));
    let mut keys = KeyStates::new();
    keys.press(KeyCode::KeyW);
    keys.press(KeyCode::KeyR);

    driver.process_input(&keys, &mut controller);
    assert_eq!(
        controller.active_movements(),
        &[CameraMovement::Forward, CameraMovement::Up]
    );
    controller.tick_update_camera(&mut camera, Duration::from_secs(1));

    // 2.5 units forward (-Z) and 2.5 units up.
    assert!((camera.position.z - -0.5).abs() < 1e-4);
    assert!((camera.position.y - 2.5).abs() < 1e-4);
    assert!(camera.position.x.abs() < 1e-4);

    keys.clear();
    driver.process_input(&keys, &mut controller);
    assert!(controller.active_movements().is_empty());
}

fn at(secs: u64) -> Duration {
    Duration::from_secs(secs)
}

#[test]
fn should_freeze_light_while_paused() {
    let mut driver = FrameDriver::new(KeyBindings::shadows());
    let mut light = PointLight::new(Vector3::new(0.0, 0.0, 0.0), LightOrbit::default());
    let mut keys = KeyStates::new();

    driver.step(&mut light, at(1));
    let before_pause = light.position();
    assert_eq!(before_pause, light.orbit().position_at(at(1)));

    keys.press(KeyCode::KeyP);
    frames(&mut driver, &keys, 1);
    for secs in 2..=5 {
        frames(&mut driver, &keys, 1);
        driver.step(&mut light, at(secs));
        assert_eq!(light.position(), before_pause);
    }
}

#[test]
fn should_count_paused_time_after_resume() {
    let mut driver = FrameDriver::new(KeyBindings::shadows());
    let mut light = PointLight::new(Vector3::new(0.0, 0.0, 0.0), LightOrbit::default());
    let mut keys = KeyStates::new();

    driver.step(&mut light, at(1));
    keys.press(KeyCode::KeyP);
    frames(&mut driver, &keys, 1);
    keys.release(KeyCode::KeyP);
    frames(&mut driver, &keys, 1);
    driver.step(&mut light, at(11));
    assert_eq!(light.position(), light.orbit().position_at(at(1)));

    keys.press(KeyCode::KeyP);
    frames(&mut driver, &keys, 1);
    assert!(driver.is_running());
    driver.step(&mut light, at(12));

    let expected = Vector3::new(6.0_f32.cos() * 2.0, 0.0, 6.0_f32.sin() * 2.0);
    assert!((light.position() - expected).magnitude() < 1e-4);
}
