//! Point light state and its circular orbit.

use std::time::Duration;

use cgmath::Vector3;

use crate::renderer::Animated;

/// Horizontal circle the light travels on, parameterized by time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightOrbit {
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    pub height: f32,
}

impl Default for LightOrbit {
    fn default() -> Self {
        Self {
            radius: 2.0,
            angular_speed: 0.5,
            height: 0.0,
        }
    }
}

impl LightOrbit {
    pub fn position_at(&self, elapsed: Duration) -> Vector3<f32> {
        let angle = elapsed.as_secs_f32() * self.angular_speed;
        Vector3::new(
            angle.cos() * self.radius,
            self.height,
            angle.sin() * self.radius,
        )
    }
}

/// A point light with uniform falloff that moves along a [`LightOrbit`].
///
/// The position follows the scene clock, so a light that is not ticked for
/// a while (paused) jumps to its clock position on the next tick.
#[derive(Clone, Debug)]
pub struct PointLight {
    orbit: LightOrbit,
    position: Vector3<f32>,
}

impl PointLight {
    pub fn new(start: Vector3<f32>, orbit: LightOrbit) -> Self {
        Self {
            orbit,
            position: start,
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn orbit(&self) -> &LightOrbit {
        &self.orbit
    }
}

impl Animated for PointLight {
    fn tick(&mut self, scene_time: Duration) {
        self.position = self.orbit.position_at(scene_time);
    }
}
