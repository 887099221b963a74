use std::time::Duration;

use cgmath::{Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{DrawModel, Model, ModelVertex, Vertex},
        texture,
    },
    light::PointLight,
    pipelines::basic::uniform_layout,
    renderer::{Animated, DynamicRenderable},
    resources::cube_mesh,
};

const LIGHT_BOX_SCALE: f32 = 0.05;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightColorUniform {
    color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
}

impl LightColorUniform {
    pub fn new(color: [f32; 3]) -> Self {
        Self { color, _padding: 0 }
    }
}

/// The orbiting point light and the small unshaded cube that marks it.
#[derive(Debug)]
pub struct LightBox {
    pub light: PointLight,
    model: Model,
    pipeline: wgpu::RenderPipeline,
    color_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
}

impl LightBox {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        globals_layout: &wgpu::BindGroupLayout,
        light: PointLight,
    ) -> Self {
        // Drawn unshaded in a flat colour, so the cube needs no material.
        let model = Model {
            meshes: cube_mesh(device, "light box", false).into_iter().collect(),
            materials: Vec::new(),
        };

        let color_layout = uniform_layout(device, "light_color_bind_group_layout");
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Color Buffer"),
            contents: bytemuck::cast_slice(&[LightColorUniform::new([1.0, 1.0, 1.0])]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let color_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &color_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: color_buffer.as_entire_binding(),
            }],
            label: Some("light_color_bind_group"),
        });

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Box Instance Buffer"),
            contents: bytemuck::cast_slice(&[marker_instance(light.position())]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Light Pipeline Layout"),
            bind_group_layouts: &[globals_layout, &color_layout],
            push_constant_ranges: &[],
        });
        let shader = wgpu::ShaderModuleDescriptor {
            label: Some("Light Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("light.wgsl").into()),
        };
        let pipeline = crate::pipelines::basic::mk_render_pipeline(
            device,
            &layout,
            Some(config.format),
            Some(wgpu::BlendState {
                alpha: wgpu::BlendComponent::REPLACE,
                color: wgpu::BlendComponent::REPLACE,
            }),
            Some(texture::Texture::DEPTH_FORMAT),
            &[ModelVertex::desc(), InstanceRaw::desc()],
            shader,
            Some(wgpu::Face::Back),
        );

        Self {
            light,
            model,
            pipeline,
            color_bind_group,
            instance_buffer,
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.light.position()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

fn marker_instance(position: Vector3<f32>) -> InstanceRaw {
    InstanceRaw::from_matrix(
        &(Matrix4::from_translation(position) * Matrix4::from_scale(LIGHT_BOX_SCALE)),
    )
}

impl Animated for LightBox {
    fn tick(&mut self, scene_time: Duration) {
        self.light.tick(scene_time);
    }
}

impl DynamicRenderable for LightBox {
    fn draw(&self, queue: &wgpu::Queue, pass: &mut wgpu::RenderPass<'_>, globals: &wgpu::BindGroup) {
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&[marker_instance(self.light.position())]),
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, globals, &[]);
        pass.set_bind_group(1, &self.color_bind_group, &[]);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.draw_model_geometry(&self.model, 0..1);
    }
}
