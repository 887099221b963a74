//! Renderer configuration.
//!
//! Each demo has its own defaults; a few settings can be overridden through
//! `RT_RENDER_*` environment variables so assets can live outside the working
//! directory.

use std::path::{Path, PathBuf};

use cgmath::{Point3, Vector3};

use crate::light::LightOrbit;

pub const ASSETS_ENV: &str = "RT_RENDER_ASSETS";
pub const FLOOR_TEXTURE_ENV: &str = "RT_RENDER_FLOOR_TEXTURE";

#[derive(Clone, Debug)]
pub struct RendererConfig {
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub clear_colour: wgpu::Color,
    pub camera_position: Point3<f32>,
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Root for relative model and texture paths.
    pub assets_dir: PathBuf,
}

impl RendererConfig {
    pub fn model_viewer() -> Self {
        Self {
            title: "RT Render".to_string(),
            screen_width: 800,
            screen_height: 600,
            clear_colour: wgpu::Color {
                r: 0.05,
                g: 0.05,
                b: 0.05,
                a: 1.0,
            },
            camera_position: Point3::new(0.0, 0.0, 3.0),
            fovy_deg: 45.0,
            znear: 0.1,
            zfar: 100.0,
            assets_dir: PathBuf::from("assets"),
        }
    }

    pub fn point_shadows() -> Self {
        Self {
            title: "RT Render: point shadows".to_string(),
            screen_width: 1200,
            screen_height: 800,
            clear_colour: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            camera_position: Point3::new(0.0, 0.0, 2.0),
            ..Self::model_viewer()
        }
    }

    /// Apply `RT_RENDER_ASSETS` if it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(ASSETS_ENV) {
            log::info!("using asset directory {:?}", dir);
            self.assets_dir = PathBuf::from(dir);
        }
        self
    }

    /// Resolve `path` against the asset directory unless it is absolute.
    pub fn asset_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.assets_dir.join(path)
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::model_viewer()
    }
}

#[derive(Clone, Debug)]
pub struct ShadowConfig {
    /// Edge length of each cube face in texels.
    pub resolution: u32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub light_start: Vector3<f32>,
    pub orbit: LightOrbit,
    /// Image used for the demo scene instead of the generated checkerboard.
    pub scene_texture: Option<PathBuf>,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            resolution: 1024,
            near_plane: 0.1,
            far_plane: 25.0,
            light_start: Vector3::new(0.0, 0.0, 0.0),
            orbit: LightOrbit::default(),
            scene_texture: None,
        }
    }
}

impl ShadowConfig {
    /// Apply `RT_RENDER_FLOOR_TEXTURE` if it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = std::env::var_os(FLOOR_TEXTURE_ENV) {
            self.scene_texture = Some(PathBuf::from(path));
        }
        self
    }
}
