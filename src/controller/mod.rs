// CONTROLLER: input sampling, frame timing, and camera integration
pub mod camera_controller;
pub mod frame_clock;
pub mod input;

pub use camera_controller::CameraController;
pub use frame_clock::FrameClock;
pub use input::{InputEvent, InputState, KeyBindings};
