use std::path::PathBuf;

use cgmath::{Matrix4, SquareMatrix};
use rt_render::{
    PointShadowsRenderer,
    config::{RendererConfig, ShadowConfig},
};

fn main() -> anyhow::Result<()> {
    let models: Vec<_> = std::env::args_os()
        .skip(1)
        .map(|path| (PathBuf::from(path), Matrix4::identity()))
        .collect();

    let renderer = PointShadowsRenderer::new(
        RendererConfig::point_shadows().with_env_overrides(),
        ShadowConfig::default().with_env_overrides(),
    );
    rt_render::run(renderer, models)
}
