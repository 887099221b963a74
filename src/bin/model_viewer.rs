use std::path::PathBuf;

use cgmath::{Matrix4, Vector3};
use rt_render::{SimpleRenderer, config::RendererConfig};

/// Models are moved down into view and shrunk to fit a character-sized model.
fn viewer_placement() -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.0, -1.75, 0.0)) * Matrix4::from_scale(0.2)
}

fn main() -> anyhow::Result<()> {
    let models: Vec<_> = std::env::args_os()
        .skip(1)
        .map(|path| (PathBuf::from(path), viewer_placement()))
        .collect();
    if models.is_empty() {
        eprintln!("usage: model-viewer MODEL [MODEL ...]");
    }

    let renderer = SimpleRenderer::new(RendererConfig::model_viewer().with_env_overrides());
    rt_render::run(renderer, models)
}
