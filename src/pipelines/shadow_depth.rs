//! Depth pass of the point shadow: the scene as seen from the light, stored
//! as distance in the six layers of a [`DepthCubemap`].
//!
//! Each face is its own render pass. The face uniforms live side by side in
//! one buffer and are selected with a dynamic offset.

use std::num::NonZeroU64;

use cgmath::{Matrix4, Vector3};

use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{DrawModel, ModelVertex, Vertex},
        object::SceneObject,
        texture::{DepthCubemap, Texture},
    },
    pipelines::basic::mk_render_pipeline,
    shadow::ShadowTransforms,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FaceUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_position: [f32; 4],
    pub far_plane: f32,
    // Uniform structs are sized in 16 byte steps.
    pub _padding: [f32; 3],
}

impl FaceUniform {
    pub fn new(view_proj: &Matrix4<f32>, light_position: Vector3<f32>, far_plane: f32) -> Self {
        Self {
            view_proj: (*view_proj).into(),
            light_position: light_position.extend(1.0).into(),
            far_plane,
            _padding: [0.0; 3],
        }
    }
}

#[derive(Debug)]
pub struct DepthCubemapRenderer {
    pipeline: wgpu::RenderPipeline,
    face_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    face_stride: wgpu::BufferAddress,
    pub cubemap: DepthCubemap,
}

impl DepthCubemapRenderer {
    pub fn new(device: &wgpu::Device, resolution: u32) -> Self {
        let uniform_size = std::mem::size_of::<FaceUniform>() as wgpu::BufferAddress;
        let face_stride = wgpu::util::align_to(
            uniform_size,
            device.limits().min_uniform_buffer_offset_alignment as wgpu::BufferAddress,
        );

        let face_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shadow Face Uniform Buffer"),
            size: face_stride * 6,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(uniform_size),
                },
                count: None,
            }],
            label: Some("shadow_face_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &face_buffer,
                    offset: 0,
                    size: NonZeroU64::new(uniform_size),
                }),
            }],
            label: Some("shadow_face_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shadow Depth Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let shader = wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Depth Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow_depth.wgsl").into()),
        };
        // The Y flip of the face projection reverses winding, so nothing is culled.
        let pipeline = mk_render_pipeline(
            device,
            &pipeline_layout,
            None,
            None,
            Some(Texture::DEPTH_FORMAT),
            &[ModelVertex::desc(), InstanceRaw::desc()],
            shader,
            None,
        );

        Self {
            pipeline,
            face_buffer,
            bind_group,
            face_stride,
            cubemap: DepthCubemap::new(device, resolution),
        }
    }

    /// Record the six face passes into `encoder`, overwriting the cubemap.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        transforms: &ShadowTransforms,
        light_position: Vector3<f32>,
        far_plane: f32,
        objects: &[SceneObject],
    ) {
        for (face, view_proj) in transforms.iter().enumerate() {
            queue.write_buffer(
                &self.face_buffer,
                face as wgpu::BufferAddress * self.face_stride,
                bytemuck::bytes_of(&FaceUniform::new(view_proj, light_position, far_plane)),
            );
        }

        for (face, view) in self.cubemap.face_views.iter().enumerate() {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            let offset = (face as wgpu::BufferAddress * self.face_stride) as wgpu::DynamicOffset;
            pass.set_bind_group(0, &self.bind_group, &[offset]);
            for object in objects {
                pass.set_vertex_buffer(1, object.instance_buffer.slice(..));
                pass.draw_model_geometry(&object.model, 0..1);
            }
        }
    }
}
