//! Model viewer: textured models under a free-fly camera.

use std::{path::Path, sync::Arc};

use cgmath::Matrix4;
use wgpu::util::DeviceExt;
use winit::{event_loop::ActiveEventLoop, window::Window};

use crate::{
    camera::CameraUniform,
    config::RendererConfig,
    context::Context,
    data_structures::{
        model::{DrawModel, Model},
        object::SceneObject,
    },
    driver::KeyBindings,
    input::KeyStates,
    pipelines::basic::{mk_basic_pipeline, uniform_layout},
    renderer::{FreeFlyView, RtRenderer, begin_main_pass, create_window, load_scene_model},
};

#[derive(Debug)]
struct ViewerGpu {
    ctx: Context,
    pipeline: wgpu::RenderPipeline,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    objects: Vec<SceneObject>,
}

#[derive(Debug)]
pub struct SimpleRenderer {
    config: RendererConfig,
    view: FreeFlyView,
    gpu: Option<ViewerGpu>,
}

impl SimpleRenderer {
    pub fn new(config: RendererConfig) -> Self {
        let view = FreeFlyView::new(&config, KeyBindings::viewer());
        Self {
            config,
            view,
            gpu: None,
        }
    }
}

impl RtRenderer for SimpleRenderer {
    fn config(&self) -> &RendererConfig {
        &self.config
    }

    async fn open_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        title: &str,
    ) -> anyhow::Result<Arc<Window>> {
        let window = create_window(event_loop, title, &self.config)?;
        let ctx = Context::new(window.clone(), self.config.clear_colour).await?;
        let (width, height) = ctx.size();
        self.view.projection.resize(width, height);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&self.view.camera, &self.view.projection);
        let camera_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout = uniform_layout(&ctx.device, "camera_bind_group_layout");
        let camera_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });
        let pipeline = mk_basic_pipeline(&ctx.device, &ctx.config, &camera_layout);

        self.gpu = Some(ViewerGpu {
            ctx,
            pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            objects: Vec::new(),
        });
        Ok(window)
    }

    async fn add_model(&mut self, path: &Path, model_matrix: Matrix4<f32>) -> anyhow::Result<()> {
        let ctx = self.gpu.as_ref().map(|gpu| &gpu.ctx);
        let model = load_scene_model(ctx, &self.config, path).await?;
        self.add_loaded_model(model, model_matrix)
    }

    fn add_loaded_model(&mut self, model: Model, model_matrix: Matrix4<f32>) -> anyhow::Result<()> {
        let gpu = self
            .gpu
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("Models can only be added once the window is open"))?;
        gpu.objects
            .push(SceneObject::new(&gpu.ctx.device, model, model_matrix));
        Ok(())
    }

    fn render(&mut self, keys: &KeyStates) -> Result<(), wgpu::SurfaceError> {
        self.view.begin_frame(keys);
        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };
        gpu.ctx.window.request_redraw();

        gpu.camera_uniform
            .update_view_proj(&self.view.camera, &self.view.projection);
        gpu.ctx.queue.write_buffer(
            &gpu.camera_buffer,
            0,
            bytemuck::cast_slice(&[gpu.camera_uniform]),
        );

        let output = gpu.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = begin_main_pass(&mut encoder, &gpu.ctx, &view);
            render_pass.set_pipeline(&gpu.pipeline);
            render_pass.set_bind_group(0, &gpu.camera_bind_group, &[]);
            for object in &gpu.objects {
                render_pass.set_vertex_buffer(1, object.instance_buffer.slice(..));
                render_pass.draw_model(&object.model, 1, 0..1);
            }
        }

        gpu.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn window_should_close(&self) -> bool {
        self.view.driver.should_close()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.view.projection.resize(width, height);
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.ctx.resize(width, height);
        }
    }

    fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.view.mouse_motion(dx, dy);
    }

    fn handle_scroll(&mut self, dy: f32) {
        self.view.scroll(dy);
    }

    fn window(&self) -> Option<&Arc<Window>> {
        self.gpu.as_ref().map(|gpu| &gpu.ctx.window)
    }
}
