//! Meshes, materials and the draw helpers for them.
//!
//! A [`Model`] is immutable once loaded: a list of meshes, each pointing at
//! one of the model's materials. Every model owns at least one material so
//! that a mesh with a missing or out-of-range material index still draws.

use std::ops::Range;

use crate::data_structures::texture::{Texture, create_default_sampler};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[derive(Debug)]
pub struct Material {
    #[allow(unused)]
    pub name: String,
    pub diffuse_texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        diffuse_texture: Texture,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let sampler = diffuse_texture
            .sampler
            .clone()
            .unwrap_or_else(|| create_default_sampler(device));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some(name),
        });

        Self {
            name: name.to_string(),
            diffuse_texture,
            bind_group,
        }
    }
}

#[derive(Debug)]
pub struct Mesh {
    #[allow(unused)]
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub material: usize,
}

#[derive(Debug)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
}

impl Model {
    /// Material for `mesh`, falling back to the last material (the default
    /// one appended by the loaders) when the index is out of range.
    pub fn material_for(&self, mesh: &Mesh) -> Option<&Material> {
        self.materials
            .get(mesh.material)
            .or_else(|| self.materials.last())
    }
}

/// Draw calls for [`Model`]s. Per-object transforms come from the instance
/// buffer the caller binds at vertex slot 1.
pub trait DrawModel {
    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        material: &Material,
        material_group: u32,
        instances: Range<u32>,
    );

    fn draw_model(&mut self, model: &Model, material_group: u32, instances: Range<u32>);

    /// Geometry only, for passes that do not sample materials.
    fn draw_model_geometry(&mut self, model: &Model, instances: Range<u32>);
}

impl DrawModel for wgpu::RenderPass<'_> {
    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        material: &Material,
        material_group: u32,
        instances: Range<u32>,
    ) {
        self.set_bind_group(material_group, &material.bind_group, &[]);
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.num_elements, 0, instances);
    }

    fn draw_model(&mut self, model: &Model, material_group: u32, instances: Range<u32>) {
        for mesh in &model.meshes {
            match model.material_for(mesh) {
                Some(material) => {
                    self.draw_mesh(mesh, material, material_group, instances.clone())
                }
                None => log::warn!("mesh {} has no material and is skipped", mesh.name),
            }
        }
    }

    fn draw_model_geometry(&mut self, model: &Model, instances: Range<u32>) {
        for mesh in &model.meshes {
            self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            self.draw_indexed(0..mesh.num_elements, 0, instances.clone());
        }
    }
}
