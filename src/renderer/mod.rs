//! Renderer capabilities and the two demo renderers.
//!
//! A renderer opens its own window, owns every GPU resource it draws with and
//! renders one frame per call. Camera and mouse state live in the renderer
//! instance.

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context as _;
use cgmath::{Deg, Matrix4};
use instant::Instant;
use winit::{
    dpi::PhysicalSize,
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Window},
};

use crate::{
    camera::{Camera, CameraController, Projection},
    config::RendererConfig,
    context::Context,
    data_structures::model::Model,
    driver::{FrameDriver, KeyBindings},
    input::KeyStates,
    resources::load_model,
};

pub mod point_shadows;
pub mod simple;

pub use point_shadows::PointShadowsRenderer;
pub use simple::SimpleRenderer;

/// What the application loop needs from a renderer.
#[allow(async_fn_in_trait)]
pub trait RtRenderer {
    fn config(&self) -> &RendererConfig;

    /// Create the window and every GPU resource. Called once.
    async fn open_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        title: &str,
    ) -> anyhow::Result<Arc<Window>>;

    /// Load a model (relative paths resolve against the asset directory) and
    /// add it to the scene with a fixed model matrix.
    async fn add_model(&mut self, path: &Path, model_matrix: Matrix4<f32>) -> anyhow::Result<()>;

    fn add_loaded_model(&mut self, model: Model, model_matrix: Matrix4<f32>) -> anyhow::Result<()>;

    /// Poll input, advance the scene and draw one frame.
    fn render(&mut self, keys: &KeyStates) -> Result<(), wgpu::SurfaceError>;

    fn window_should_close(&self) -> bool;

    fn resize(&mut self, width: u32, height: u32);

    fn handle_mouse_motion(&mut self, dx: f64, dy: f64);

    fn handle_scroll(&mut self, dy: f32);

    fn window(&self) -> Option<&Arc<Window>>;
}

/// Scene state driven by the scene clock.
pub trait Animated {
    /// Move to where the object is `scene_time` after the scene started.
    fn tick(&mut self, scene_time: Duration);
}

/// Something in the scene that changes every frame and draws itself.
pub trait DynamicRenderable: Animated {
    fn draw(&self, queue: &wgpu::Queue, pass: &mut wgpu::RenderPass<'_>, globals: &wgpu::BindGroup);
}

/// Turns key state into camera motion.
pub trait CameraEventHandler {
    /// Sample the keys once per frame.
    fn keyboard_events(&mut self, keys: &KeyStates);

    fn tick_update_camera(&mut self, camera: &mut Camera, dt: Duration);
}

/// Open a window of the configured size with the cursor captured for mouse look.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    title: &str,
    config: &RendererConfig,
) -> anyhow::Result<Arc<Window>> {
    let attributes = Window::default_attributes()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(config.screen_width, config.screen_height));
    let window = Arc::new(
        event_loop
            .create_window(attributes)
            .context("Failed to create a window")?,
    );

    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        log::warn!("Could not capture the cursor: {}", e);
    }
    window.set_cursor_visible(false);

    Ok(window)
}

/// Load `path` for the renderer owning `ctx`, resolving it against the asset
/// directory first.
pub async fn load_scene_model(
    ctx: Option<&Context>,
    config: &RendererConfig,
    path: &Path,
) -> anyhow::Result<Model> {
    let ctx = ctx.context("Models can only be added once the window is open")?;
    load_model(&config.asset_path(path), &ctx.device, &ctx.queue).await
}

/// Camera, projection and frame driver shared by both renderers.
#[derive(Debug)]
pub struct FreeFlyView {
    pub camera: Camera,
    pub projection: Projection,
    pub controller: CameraController,
    pub driver: FrameDriver,
    last_frame: Instant,
}

impl FreeFlyView {
    pub fn new(config: &RendererConfig, bindings: KeyBindings) -> Self {
        Self {
            camera: Camera::looking_forward(config.camera_position),
            projection: Projection::new(
                config.screen_width,
                config.screen_height,
                Deg(config.fovy_deg),
                config.znear,
                config.zfar,
            ),
            controller: CameraController::new(),
            driver: FrameDriver::new(bindings),
            last_frame: Instant::now(),
        }
    }

    /// Measure the frame time, apply input and move the camera.
    pub fn begin_frame(&mut self, keys: &KeyStates) -> Duration {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        self.driver.process_input(keys, &mut self.controller);
        self.controller.tick_update_camera(&mut self.camera, dt);
        dt
    }

    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        // Window y grows downwards, pitch grows upwards.
        self.camera.process_mouse_movement(dx as f32, -dy as f32);
    }

    pub fn scroll(&mut self, dy: f32) {
        self.projection.process_scroll(dy);
    }
}

/// Begin the on-screen pass, clearing colour and depth.
pub fn begin_main_pass<'encoder>(
    encoder: &'encoder mut wgpu::CommandEncoder,
    ctx: &Context,
    view: &wgpu::TextureView,
) -> wgpu::RenderPass<'encoder> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(ctx.clear_colour),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &ctx.depth_texture.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    })
}
