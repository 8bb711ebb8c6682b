// VIEW: GPU setup, textures, pipelines and uniforms
pub mod gpu_init;
pub mod render;
pub mod texture;

pub use gpu_init::GpuContext;
pub use render::{CameraResources, CameraUniform, ModelResources, ModelUniform};
pub use texture::Texture;
