//! Application event loop.
//!
//! [`App`] owns a renderer and drives it from winit: keyboard events are
//! folded into [`KeyStates`], mouse motion and the wheel go straight to the
//! renderer, and every redraw renders one frame and requests the next.
//!
//! # Lifecycle
//!
//! 1. `resumed` opens the window through the renderer and loads the models
//!    given on the command line
//! 2. window and device events update input state
//! 3. `RedrawRequested` renders a frame; the loop exits once the renderer
//!    reports that its window should close

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use cgmath::Matrix4;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{input::KeyStates, renderer::RtRenderer};

/// Pixels that count as one line of scrolling for touchpads.
const PIXELS_PER_SCROLL_LINE: f32 = 20.0;

/// A model file and the matrix placing it in the scene.
pub type ModelPlacement = (PathBuf, Matrix4<f32>);

pub struct App<R: RtRenderer> {
    async_runtime: tokio::runtime::Runtime,
    renderer: R,
    // Taken once the window is open.
    pending_models: Option<Vec<ModelPlacement>>,
    keys: KeyStates,
    window: Option<Arc<Window>>,
    error: Option<anyhow::Error>,
}

impl<R: RtRenderer> App<R> {
    pub fn new(renderer: R, models: Vec<ModelPlacement>) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("Failed to start the async runtime")?;
        Ok(Self {
            async_runtime,
            renderer,
            pending_models: Some(models),
            keys: KeyStates::new(),
            window: None,
            error: None,
        })
    }

    /// The initialization error that stopped the loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

async fn initialize<R: RtRenderer>(
    renderer: &mut R,
    event_loop: &ActiveEventLoop,
    models: Vec<ModelPlacement>,
) -> anyhow::Result<Arc<Window>> {
    let title = renderer.config().title.clone();
    let window = renderer.open_window(event_loop, &title).await?;
    for (path, model_matrix) in models {
        renderer.add_model(&path, model_matrix).await?;
    }
    Ok(window)
}

impl<R: RtRenderer> ApplicationHandler for App<R> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(models) = self.pending_models.take() else {
            return;
        };
        let init = initialize(&mut self.renderer, event_loop, models);
        match self.async_runtime.block_on(init) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if self.window.is_none() {
            return;
        }
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.renderer.handle_mouse_motion(dx, dy);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.renderer.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => self.keys.apply_key_event(&event),
            // Releases that happen while unfocused never arrive.
            WindowEvent::Focused(false) => self.keys.clear(),
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => {
                        position.y as f32 / PIXELS_PER_SCROLL_LINE
                    }
                };
                self.renderer.handle_scroll(dy);
            }
            WindowEvent::RedrawRequested => match self.renderer.render(&self.keys) {
                Ok(()) => {
                    if self.renderer.window_should_close() {
                        log::info!("closing window");
                        event_loop.exit();
                    }
                }
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = window.inner_size();
                    self.renderer.resize(size.width, size.height);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                    window.request_redraw();
                }
            },
            _ => {}
        }
    }
}

/// Run `renderer` until its window closes.
///
/// Initializes logging from `RUST_LOG`. Errors while opening the window or
/// loading `models` stop the loop and are returned.
pub fn run<R: RtRenderer>(renderer: R, models: Vec<ModelPlacement>) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new().context("Failed to create an event loop")?;
    let mut app = App::new(renderer, models)?;

    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
