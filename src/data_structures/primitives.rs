//! Built-in cube geometry.
//!
//! The cube spans -1..1 on every axis. Triangles wind counter-clockwise when
//! seen from the side their normals point to.

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::ModelVertex;

/// Normal, then two in-face axes whose cross product is the normal.
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

const CORNERS: [(f32, f32); 6] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (1.0, 1.0),
    (-1.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
];

/// Vertices and indices of a cube seen from outside.
pub fn cube() -> (Vec<ModelVertex>, Vec<u32>) {
    let vertices: Vec<ModelVertex> = FACES
        .iter()
        .flat_map(|&(normal, u, v)| {
            let n = Vector3::from(normal);
            let u = Vector3::from(u);
            let v = Vector3::from(v);
            CORNERS.iter().map(move |&(s, t)| ModelVertex {
                position: (n + u * s + v * t).into(),
                tex_coords: [(s + 1.0) / 2.0, (1.0 - t) / 2.0],
                normal,
            })
        })
        .collect();
    let indices = (0..vertices.len() as u32).collect();
    (vertices, indices)
}

/// A cube meant to be seen from inside, such as a room: normals point inward
/// and every triangle's winding is reversed.
pub fn inverted_cube() -> (Vec<ModelVertex>, Vec<u32>) {
    let (mut vertices, mut indices) = cube();
    for vertex in &mut vertices {
        vertex.normal = (-Vector3::from(vertex.normal)).into();
    }
    for triangle in indices.chunks_exact_mut(3) {
        triangle.swap(1, 2);
    }
    (vertices, indices)
}

/// Face normal implied by a triangle's winding.
pub fn winding_normal(a: &ModelVertex, b: &ModelVertex, c: &ModelVertex) -> Vector3<f32> {
    let a = Vector3::from(a.position);
    let b = Vector3::from(b.position);
    let c = Vector3::from(c.position);
    (b - a).cross(c - a).normalize()
}
