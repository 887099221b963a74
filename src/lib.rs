//! rt-render
//!
//! Small real-time rendering demos on wgpu: a textured model viewer and a
//! point light shadow demo that renders an omnidirectional depth cubemap and
//! shades the scene against it. A bilinear interpolator and texture file I/O
//! come along as utilities.
//!
//! High-level modules
//! - `app`: winit event loop driving a renderer
//! - `camera`: free-fly camera, projection and camera uniform
//! - `config`: per-demo settings and environment overrides
//! - `context`: window surface, device and queue
//! - `data_structures`: meshes, materials, textures and placed objects
//! - `driver`: per-frame input handling, pause and shadow toggles
//! - `input`: key state folded from window events
//! - `interpolation`: linear and bilinear interpolation
//! - `light`: the orbiting point light
//! - `pipelines`: render pipelines and WGSL shaders
//! - `renderer`: renderer capability traits and the two demo renderers
//! - `resources`: model and texture loading
//! - `shadow`: cube face matrices for the shadow depth pass
//!

pub mod app;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod driver;
pub mod input;
pub mod interpolation;
pub mod light;
pub mod pipelines;
pub mod renderer;
pub mod resources;
pub mod shadow;

// Re-exports commonly used types for convenience in downstream code.
pub use app::run;
pub use renderer::{PointShadowsRenderer, RtRenderer, SimpleRenderer};
