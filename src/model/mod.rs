// MODEL: camera state and the fixed cube field
pub mod camera;
pub mod scene;

pub use camera::Camera;
pub use scene::{CubeField, CubeTransform, CUBE_COUNT};
