use std::time::Duration;

use cgmath::{InnerSpace, Vector3};
use rt_render::{
    light::{LightOrbit, PointLight},
    renderer::Animated,
};

const EPS: f32 = 1e-4;

#[test]
fn should_stay_on_orbit_circle() {
    let orbit = LightOrbit::default();
    for millis in (0..20_000).step_by(730) {
        let position = orbit.position_at(Duration::from_millis(millis));
        let horizontal = Vector3::new(position.x, 0.0, position.z);
        assert!((horizontal.magnitude() - orbit.radius).abs() < EPS);
        assert_eq!(position.y, orbit.height);
    }
}

#[test]
fn should_follow_orbit_formula() {
    let orbit = LightOrbit::default();
    let t = 3.0_f32;
    let position = orbit.position_at(Duration::from_secs_f32(t));
    assert!((position.x - (t * 0.5).cos() * 2.0).abs() < EPS);
    assert!((position.z - (t * 0.5).sin() * 2.0).abs() < EPS);
}

#[test]
fn should_start_at_given_position() {
    let light = PointLight::new(Vector3::new(0.0, 0.0, 0.0), LightOrbit::default());
    assert_eq!(light.position(), Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn should_follow_scene_clock_not_tick_count() {
    let mut light = PointLight::new(Vector3::new(0.0, 0.0, 0.0), LightOrbit::default());
    light.tick(Duration::from_secs(1));
    // Ten seconds without ticks, then one more tick.
    light.tick(Duration::from_secs(12));

    let expected = Vector3::new(6.0_f32.cos() * 2.0, 0.0, 6.0_f32.sin() * 2.0);
    assert!((light.position() - expected).magnitude() < EPS);
    assert_eq!(light.position(), light.orbit().position_at(Duration::from_secs(12)));
}
