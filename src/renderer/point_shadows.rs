//! Point light shadow demo.
//!
//! Every frame runs two stages into one command encoder: the depth pass
//! renders the scene from the light into the depth cubemap, then the shading
//! pass draws the scene from the camera sampling that cubemap, followed by the
//! light marker.

use std::{path::Path, sync::Arc};

use cgmath::{Deg, InnerSpace, Matrix4, Rotation3, Vector3};
use instant::Instant;
use winit::{event_loop::ActiveEventLoop, window::Window};

use crate::{
    config::{RendererConfig, ShadowConfig},
    context::Context,
    data_structures::{model::Model, object::SceneObject},
    driver::KeyBindings,
    input::KeyStates,
    light::PointLight,
    pipelines::{
        light::LightBox, shadow_depth::DepthCubemapRenderer, shadow_scene::ShadedSceneRenderer,
    },
    renderer::{
        DynamicRenderable, FreeFlyView, RtRenderer, begin_main_pass, create_window,
        load_scene_model,
    },
    resources::{
        load_cube_model,
        texture::{TextureData, TextureKind, texture_from_file},
    },
    shadow::ShadowTransforms,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeKind {
    /// Seen from inside.
    Room,
    Block,
}

/// Room and cubes of the demo scene with their model matrices.
pub fn demo_scene_layout() -> Vec<(CubeKind, Matrix4<f32>)> {
    let place = |x: f32, y: f32, z: f32, scale: f32| {
        Matrix4::from_translation(Vector3::new(x, y, z)) * Matrix4::from_scale(scale)
    };
    let tilted = Matrix4::from_translation(Vector3::new(-1.5, 2.0, -3.0))
        * Matrix4::from(cgmath::Quaternion::from_axis_angle(
            Vector3::new(1.0, 0.0, 1.0).normalize(),
            Deg(60.0),
        ))
        * Matrix4::from_scale(0.75);

    vec![
        (CubeKind::Room, Matrix4::from_scale(5.0)),
        (CubeKind::Block, place(4.0, -3.5, 0.0, 0.5)),
        (CubeKind::Block, place(2.0, 3.0, 1.0, 0.75)),
        (CubeKind::Block, place(-3.0, -1.0, 0.0, 0.5)),
        (CubeKind::Block, place(-1.5, 1.0, 1.5, 0.5)),
        (CubeKind::Block, tilted),
    ]
}

#[derive(Debug)]
struct ShadowGpu {
    ctx: Context,
    depth: DepthCubemapRenderer,
    scene: ShadedSceneRenderer,
    light_box: LightBox,
    objects: Vec<SceneObject>,
    // Origin of the scene clock the light orbit follows.
    started: Instant,
}

#[derive(Debug)]
pub struct PointShadowsRenderer {
    config: RendererConfig,
    shadow: ShadowConfig,
    view: FreeFlyView,
    gpu: Option<ShadowGpu>,
}

impl PointShadowsRenderer {
    pub fn new(config: RendererConfig, shadow: ShadowConfig) -> Self {
        let view = FreeFlyView::new(&config, KeyBindings::shadows());
        Self {
            config,
            shadow,
            view,
            gpu: None,
        }
    }

    fn scene_texture(&self) -> anyhow::Result<TextureData> {
        match &self.shadow.scene_texture {
            Some(path) => texture_from_file(self.config.asset_path(path), TextureKind::Diffuse),
            None => Ok(TextureData::checkerboard(
                256,
                8,
                [200, 200, 200, 255],
                [110, 110, 110, 255],
            )),
        }
    }

    fn add_demo_scene(&mut self) -> anyhow::Result<()> {
        let texture = self.scene_texture()?;
        for (kind, model_matrix) in demo_scene_layout() {
            let gpu = self
                .gpu
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("The demo scene needs an open window"))?;
            let model = load_cube_model(
                &gpu.ctx.device,
                &gpu.ctx.queue,
                kind == CubeKind::Room,
                texture.clone(),
            )?;
            self.add_loaded_model(model, model_matrix)?;
        }
        log::info!("demo scene ready");
        Ok(())
    }
}

impl RtRenderer for PointShadowsRenderer {
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

        let depth = DepthCubemapRenderer::new(&ctx.device, self.shadow.resolution);
        let scene = ShadedSceneRenderer::new(
            &ctx.device,
            &ctx.config,
            &depth.cubemap,
            self.shadow.far_plane,
        );
        let light = PointLight::new(self.shadow.light_start, self.shadow.orbit);
        let light_box = LightBox::new(&ctx.device, &ctx.config, &scene.globals.layout, light);

        self.gpu = Some(ShadowGpu {
            ctx,
            depth,
            scene,
            light_box,
            objects: Vec::new(),
            started: Instant::now(),
        });
        self.add_demo_scene()?;
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

        self.view
            .driver
            .step(&mut gpu.light_box, gpu.started.elapsed());
        let light_position = gpu.light_box.position();
        let transforms = ShadowTransforms::new(
            light_position,
            self.shadow.near_plane,
            self.shadow.far_plane,
        );

        gpu.scene.globals.uniform.update(
            &self.view.camera,
            &self.view.projection,
            light_position,
            self.view.driver.shadows_enabled(),
        );
        gpu.scene.globals.write(&gpu.ctx.queue);

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

        gpu.depth.render(
            &mut encoder,
            &gpu.ctx.queue,
            &transforms,
            light_position,
            self.shadow.far_plane,
            &gpu.objects,
        );
        {
            let mut render_pass = begin_main_pass(&mut encoder, &gpu.ctx, &view);
            gpu.scene.draw(&mut render_pass, &gpu.objects);
            gpu.light_box
                .draw(&gpu.ctx.queue, &mut render_pass, &gpu.scene.globals.bind_group);
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
