//! WebGPU rendering module
//!
//! Flat-colored triangle lists only: the scene builder emits quads in game
//! space, the pipeline maps them to NDC and draws in one pass.

pub mod pipeline;
pub mod scene;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
