use crate::model::Camera;

use super::input::{InputState, KeyBindings};

/// Integrates held keys into camera position and facing.
pub struct CameraController {
    /// World units per millisecond of held movement key.
    pub move_rate: f32,
    /// Lateral facing shift per millisecond of held turn key.
    pub turn_rate: f32,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            move_rate: 0.005,
            turn_rate: 0.002,
        }
    }

    /// Apply one frame of movement and turning.
    ///
    /// Held keys compose additively within the frame. The strafe axis is
    /// renormalized so strafe speed does not depend on the angle between
    /// front and up. The turn keys shift `front.x` directly and the vector
    /// is not renormalized afterwards, so sustained turning drifts its
    /// magnitude.
    pub fn update(&self, camera: &mut Camera, input: &InputState, bindings: &KeyBindings, dt_ms: f32) {
        let move_speed = self.move_rate * dt_ms;
        let turn_speed = self.turn_rate * dt_ms;

        if input.is_held(bindings.forward) {
            camera.position += camera.front * move_speed;
        }
        if input.is_held(bindings.backward) {
            camera.position -= camera.front * move_speed;
        }
        if input.is_held(bindings.strafe_left) {
            camera.position -= camera.right() * move_speed;
        }
        if input.is_held(bindings.strafe_right) {
            camera.position += camera.right() * move_speed;
        }
        if input.is_held(bindings.turn_left) {
            camera.front.x -= turn_speed;
        }
        if input.is_held(bindings.turn_right) {
            camera.front.x += turn_speed;
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::input::InputEvent;
    use glam::Vec3;
    use winit::keyboard::KeyCode;

    fn held(keys: &[KeyCode]) -> InputState {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        for &key in keys {
            input.process_event(&InputEvent::KeyDown(key), &bindings);
        }
        input
    }

    #[test]
    fn test_no_keys_leaves_camera_unchanged() {
        let controller = CameraController::new();
        let bindings = KeyBindings::default();
        let mut camera = Camera::new(800, 600);
        let position = camera.position;
        let front = camera.front;

        for dt in [0.0, 0.1, 16.0, 1000.0] {
            controller.update(&mut camera, &InputState::new(), &bindings, dt);
        }
        assert_eq!(camera.position, position);
        assert_eq!(camera.front, front);
    }

    #[test]
    fn test_forward_moves_along_front() {
        let controller = CameraController::new();
        let bindings = KeyBindings::default();
        let mut camera = Camera::new(800, 600);
        let input = held(&[KeyCode::KeyW]);

        controller.update(&mut camera, &input, &bindings, 16.0);
        let expected = Vec3::new(0.0, 0.0, 3.0) + Vec3::new(0.0, 0.0, -1.0) * 0.005 * 16.0;
        assert!((camera.position - expected).length() < 1e-6);
    }

    #[test]
    fn test_forward_for_one_second() {
        // Starting at (0,0,3) facing -z, a simulated 1000ms of forward at
        // 0.005 units/ms ends up at z = 3 - 5 = -2.
        let controller = CameraController::new();
        let bindings = KeyBindings::default();
        let mut camera = Camera::new(800, 600);
        let input = held(&[KeyCode::KeyW]);

        let mut remaining: f32 = 1000.0;
        while remaining > 0.0 {
            let dt = remaining.min(16.0);
            controller.update(&mut camera, &input, &bindings, dt);
            remaining -= dt;
        }
        assert!((camera.position.z - -2.0).abs() < 1e-3, "z = {}", camera.position.z);
        assert!(camera.position.x.abs() < 1e-6);
        assert!(camera.position.y.abs() < 1e-6);
    }

    #[test]
    fn test_opposite_strafes_cancel() {
        let controller = CameraController::new();
        let bindings = KeyBindings::default();
        let mut camera = Camera::new(800, 600);
        let input = held(&[KeyCode::KeyA, KeyCode::KeyD]);

        controller.update(&mut camera, &input, &bindings, 100.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_strafe_speed_independent_of_front_up_angle() {
        let controller = CameraController::new();
        let bindings = KeyBindings::default();
        let input = held(&[KeyCode::KeyD]);

        // Straight ahead
        let mut level = Camera::new(800, 600);
        controller.update(&mut level, &input, &bindings, 50.0);
        let level_step = (level.position - Vec3::new(0.0, 0.0, 3.0)).length();

        // Tilted well below the horizon; cross(front, up) shrinks but the
        // strafe axis is renormalized
        let mut tilted = Camera::new(800, 600);
        tilted.front = Vec3::new(0.0, -0.8, -0.6);
        controller.update(&mut tilted, &input, &bindings, 50.0);
        let tilted_step = (tilted.position - Vec3::new(0.0, 0.0, 3.0)).length();

        assert!((level_step - tilted_step).abs() < 1e-5);
    }

    #[test]
    fn test_turning_shifts_front_laterally() {
        let controller = CameraController::new();
        let bindings = KeyBindings::default();
        let mut camera = Camera::new(800, 600);
        let input = held(&[KeyCode::KeyE]);

        controller.update(&mut camera, &input, &bindings, 10.0);
        assert!((camera.front.x - 0.002 * 10.0).abs() < 1e-6);
        assert_eq!(camera.front.z, -1.0);

        // The front vector is deliberately not renormalized
        assert!(camera.front.length() > 1.0);
    }

    #[test]
    fn test_movement_and_turning_compose() {
        let controller = CameraController::new();
        let bindings = KeyBindings::default();
        let mut camera = Camera::new(800, 600);
        let input = held(&[KeyCode::KeyW, KeyCode::KeyQ]);

        controller.update(&mut camera, &input, &bindings, 20.0);
        // Forward applied with the frame's starting front, turn applied after
        assert!((camera.position.z - (3.0 - 0.005 * 20.0)).abs() < 1e-6);
        assert!((camera.front.x - -0.04).abs() < 1e-6);
    }
}
