//! Cube-face view/projection matrices for omnidirectional shadows.
//!
//! A point light sees the scene through six 90° frusta, one per cube face, in
//! the order +X, -X, +Y, -Y, +Z, -Z. The up vectors follow the usual cube-map
//! convention so that a direction sampled in the shading pass lands on the
//! texel the depth pass wrote for it.

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, Vector3, perspective};

/// Face directions and their up vectors.
pub const CUBE_FACES: [(Vector3<f32>, Vector3<f32>); 6] = [
    (Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0)),
    (Vector3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0)),
    (Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
    (Vector3::new(0.0, -1.0, 0.0), Vector3::new(0.0, 0.0, -1.0)),
    (Vector3::new(0.0, 0.0, 1.0), Vector3::new(0.0, -1.0, 0.0)),
    (Vector3::new(0.0, 0.0, -1.0), Vector3::new(0.0, -1.0, 0.0)),
];

/// GL clip space to the clip space of a cube face render target: depth is
/// remapped to 0..1 and Y is mirrored because render target rows run top-down
/// while cube-map faces are addressed bottom-up.
#[rustfmt::skip]
pub const CUBE_FACE_CLIP_CORRECTION: Matrix4<f32> = Matrix4::new(
    1.0,  0.0, 0.0, 0.0,
    0.0, -1.0, 0.0, 0.0,
    0.0,  0.0, 0.5, 0.0,
    0.0,  0.0, 0.5, 1.0,
);

/// One projection x view matrix per cube face, in [`CUBE_FACES`] order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowTransforms(pub [Matrix4<f32>; 6]);

impl ShadowTransforms {
    pub fn new(light_position: Vector3<f32>, near: f32, far: f32) -> Self {
        let projection = face_projection(near, far);
        let eye = Point3::from_vec(light_position);
        Self(CUBE_FACES.map(|(direction, up)| {
            projection * Matrix4::look_at_rh(eye, eye + direction, up)
        }))
    }

    pub fn face(&self, index: usize) -> &Matrix4<f32> {
        &self.0[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matrix4<f32>> {
        self.0.iter()
    }
}

/// Square 90° perspective shared by all six faces.
pub fn face_projection(near: f32, far: f32) -> Matrix4<f32> {
    CUBE_FACE_CLIP_CORRECTION * perspective(Deg(90.0), 1.0, near, far)
}
