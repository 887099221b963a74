//! Engine data structures: models, textures and placed objects.
//!
//! - `model` contains mesh and material definitions, GPU resources for 3D models
//! - `texture` contains GPU texture wrappers, including the shadow depth cubemap
//! - `instance` holds per-object transformation data
//! - `object` pairs a model with its world placement
//! - `primitives` is built-in cube geometry

pub mod instance;
pub mod model;
pub mod object;
pub mod primitives;
pub mod texture;
