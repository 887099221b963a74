//! Per-object transformation data for GPU rendering.
//!
//! Object transforms are handed to the vertex stage as a one-element instance
//! buffer rather than a uniform, so every pipeline reads them from the same
//! vertex slots.

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix};

use crate::data_structures::model;

/**
 * The raw instance is the actual data stored on the GPU: the model matrix and
 * the matrix that carries normals into world space.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
}

impl InstanceRaw {
    pub fn from_matrix(model: &Matrix4<f32>) -> Self {
        Self {
            model: (*model).into(),
            normal: normal_matrix(model).into(),
        }
    }
}

/// Inverse transpose of the upper 3x3 block, so non-uniform scales keep
/// normals perpendicular to their surfaces. Singular matrices fall back to
/// the block itself.
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let linear = Matrix3::from_cols(model.x.truncate(), model.y.truncate(), model.z.truncate());
    linear
        .invert()
        .map(|inverse| inverse.transpose())
        .unwrap_or(linear)
}

/**
 * As we store instance data directly in GPU memory we need to tell what the bytes refer to.
 *
 * Stride layout here: the 4x4 model matrix (four vec4 slots) followed by the
 * 3x3 normal matrix (three vec3 slots).
 */
impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Shaders only advance to the next element when a new instance starts.
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 19]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 22]>() as wgpu::BufferAddress,
                    shader_location: 11,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
