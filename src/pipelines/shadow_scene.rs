//! Shading pass of the point shadow demo.
//!
//! Every object is lit by the point light with Blinn-Phong and darkened where
//! the depth cubemap says something sits between it and the light.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::{
    camera::{Camera, Projection},
    data_structures::{
        instance::InstanceRaw,
        model::{DrawModel, ModelVertex, Vertex},
        object::SceneObject,
        texture::{DepthCubemap, Texture},
    },
    pipelines::basic::mk_render_pipeline,
    resources::texture::diffuse_layout,
};

/// Per-frame values shared by the shading and light marker pipelines.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub light_position: [f32; 4],
    pub far_plane: f32,
    pub shadows: u32,
    // Uniform structs are sized in 16 byte steps.
    pub _padding: [u32; 2],
}

impl SceneUniform {
    pub fn new(far_plane: f32) -> Self {
        Self {
            view_proj: cgmath::Matrix4::from_scale(1.0).into(),
            view_position: [0.0, 0.0, 0.0, 1.0],
            light_position: [0.0, 0.0, 0.0, 1.0],
            far_plane,
            shadows: 1,
            _padding: [0; 2],
        }
    }

    pub fn update(
        &mut self,
        camera: &Camera,
        projection: &Projection,
        light_position: Vector3<f32>,
        shadows: bool,
    ) {
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
        self.view_position = camera.position.to_homogeneous().into();
        self.light_position = light_position.extend(1.0).into();
        self.shadows = shadows as u32;
    }
}

pub fn mk_globals_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::Cube,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                count: None,
            },
        ],
        label: Some("scene_globals_bind_group_layout"),
    })
}

/// The scene uniform buffer bound together with the depth cubemap.
#[derive(Debug)]
pub struct SceneGlobals {
    pub uniform: SceneUniform,
    pub buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl SceneGlobals {
    pub fn new(device: &wgpu::Device, cubemap: &DepthCubemap, far_plane: f32) -> Self {
        let uniform = SceneUniform::new(far_plane);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout = mk_globals_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&cubemap.cube_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&cubemap.sampler),
                },
            ],
            label: Some("scene_globals_bind_group"),
        });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[derive(Debug)]
pub struct ShadedSceneRenderer {
    pipeline: wgpu::RenderPipeline,
    pub globals: SceneGlobals,
}

impl ShadedSceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        cubemap: &DepthCubemap,
        far_plane: f32,
    ) -> Self {
        let globals = SceneGlobals::new(device, cubemap, far_plane);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shadow Scene Pipeline Layout"),
            bind_group_layouts: &[&globals.layout, &diffuse_layout(device)],
            push_constant_ranges: &[],
        });
        let shader = wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow_scene.wgsl").into()),
        };
        let pipeline = mk_render_pipeline(
            device,
            &layout,
            Some(config.format),
            Some(wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            }),
            Some(Texture::DEPTH_FORMAT),
            &[ModelVertex::desc(), InstanceRaw::desc()],
            shader,
            Some(wgpu::Face::Back),
        );

        Self { pipeline, globals }
    }

    /// Draw every object in insertion order. Expects the globals to be
    /// written for this frame and the cubemap to hold this frame's depth.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, objects: &[SceneObject]) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.globals.bind_group, &[]);
        for object in objects {
            pass.set_vertex_buffer(1, object.instance_buffer.slice(..));
            pass.draw_model(&object.model, 1, 0..1);
        }
    }
}
