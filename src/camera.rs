//! Free-fly camera, projection and the uniform handed to shaders.
//!
//! The camera is an Euler-angle fly camera: yaw/pitch define the viewing
//! direction, keyboard movement is relative to it and mouse movement turns it.
//! Scroll input narrows or widens the projection's field of view.

use std::time::Duration;

use cgmath::{Deg, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, perspective};
use winit::keyboard::KeyCode;

use crate::{input::KeyStates, renderer::CameraEventHandler};

/// cgmath builds OpenGL clip space (z in -1..1); wgpu expects z in 0..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const MAX_PITCH_DEG: f32 = 89.0;
const MIN_ZOOM_DEG: f32 = 1.0;
const MAX_ZOOM_DEG: f32 = 45.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
    /// Units per second.
    pub movement_speed: f32,
    /// Degrees per pixel of mouse movement.
    pub mouse_sensitivity: f32,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
        }
    }

    /// Camera looking down -Z from `position`.
    pub fn looking_forward<V: Into<Point3<f32>>>(position: V) -> Self {
        Self::new(position, Deg(-90.0), Deg(0.0))
    }

    pub fn front(&self) -> Vector3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(Vector3::unit_y()).normalize()
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.front(), Vector3::unit_y())
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: Duration) {
        let velocity = self.movement_speed * dt.as_secs_f32();
        let offset = match direction {
            CameraMovement::Forward => self.front(),
            CameraMovement::Backward => -self.front(),
            CameraMovement::Left => -self.right(),
            CameraMovement::Right => self.right(),
            CameraMovement::Up => Vector3::unit_y(),
            CameraMovement::Down => -Vector3::unit_y(),
        };
        self.position += offset * velocity;
    }

    /// Turn the camera. `yoffset` is positive when the mouse moves up.
    pub fn process_mouse_movement(&mut self, xoffset: f32, yoffset: f32) {
        self.yaw += Rad::from(Deg(xoffset * self.mouse_sensitivity));
        self.pitch += Rad::from(Deg(yoffset * self.mouse_sensitivity));

        let max_pitch: Rad<f32> = Deg(MAX_PITCH_DEG).into();
        if self.pitch > max_pitch {
            self.pitch = max_pitch;
        } else if self.pitch < -max_pitch {
            self.pitch = -max_pitch;
        }
    }
}

#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Deg<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Deg<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn fovy(&self) -> Deg<f32> {
        self.fovy
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Zoom in for positive `yoffset`; the field of view stays within 1..=45 degrees.
    pub fn process_scroll(&mut self, yoffset: f32) {
        self.fovy = Deg((self.fovy.0 - yoffset).clamp(MIN_ZOOM_DEG, MAX_ZOOM_DEG));
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// View/projection data for shaders that only need the camera.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Movement keys and the direction each one moves the camera.
pub const DEFAULT_MOVEMENT_KEYS: [(KeyCode, CameraMovement); 6] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
    (KeyCode::KeyR, CameraMovement::Up),
    (KeyCode::KeyF, CameraMovement::Down),
];

/// Samples the movement keys each frame and moves the camera accordingly.
#[derive(Debug, Clone)]
pub struct CameraController {
    bindings: Vec<(KeyCode, CameraMovement)>,
    active: Vec<CameraMovement>,
}

impl CameraController {
    pub fn new() -> Self {
        Self::with_bindings(DEFAULT_MOVEMENT_KEYS.to_vec())
    }

    pub fn with_bindings(bindings: Vec<(KeyCode, CameraMovement)>) -> Self {
        Self {
            bindings,
            active: Vec::new(),
        }
    }

    pub fn active_movements(&self) -> &[CameraMovement] {
        &self.active
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraEventHandler for CameraController {
    fn keyboard_events(&mut self, keys: &KeyStates) {
        self.active.clear();
        for (key, movement) in &self.bindings {
            if keys.is_down(*key) && !self.active.contains(movement) {
                self.active.push(*movement);
            }
        }
    }

    fn tick_update_camera(&mut self, camera: &mut Camera, dt: Duration) {
        for movement in &self.active {
            camera.process_keyboard(*movement, dt);
        }
    }
}
