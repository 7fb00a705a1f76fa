//! WebGPU rendering module
//!
//! The scene is rebuilt as a list of colored triangles every frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_scene;
pub use vertex::Vertex;
