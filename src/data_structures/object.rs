//! A model placed in the scene.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::data_structures::{instance::InstanceRaw, model::Model};

/// A model together with the fixed matrix that places it in world space.
///
/// The matrix is uploaded once as a single-instance vertex buffer.
#[derive(Debug)]
pub struct SceneObject {
    pub model: Model,
    pub model_matrix: Matrix4<f32>,
    pub instance_buffer: wgpu::Buffer,
}

impl SceneObject {
    pub fn new(device: &wgpu::Device, model: Model, model_matrix: Matrix4<f32>) -> Self {
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Object Instance Buffer"),
            contents: bytemuck::cast_slice(&[InstanceRaw::from_matrix(&model_matrix)]),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            model,
            model_matrix,
            instance_buffer,
        }
    }
}
