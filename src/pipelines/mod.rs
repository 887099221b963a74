//! Render pipelines and their WGSL shaders.
//!
//! - `basic` holds the shared pipeline builder and the model viewer pipeline
//! - `shadow_depth` renders light distances into the depth cubemap
//! - `shadow_scene` shades the scene with the depth cubemap
//! - `light` draws the marker cube at the light position

pub mod basic;
pub mod light;
pub mod shadow_depth;
pub mod shadow_scene;
