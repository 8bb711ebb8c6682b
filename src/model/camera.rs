use glam::{Mat4, Vec3};

/// Free-fly camera.
///
/// `front` is the looking direction. The turn keys shift its lateral
/// component directly, so it is not kept normalized; `yaw`/`pitch` describe
/// the starting orientation only.
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            // yaw 0 would look along +x; start rotated to face -z
            yaw: -90f32.to_radians(),
            pitch: 0.0,
            fov_y: 45f32.to_radians(),
            aspect: width as f32 / height as f32,
            z_near: 0.1,
            z_far: 100.0,
        }
    }

    /// Normalized strafe axis. The normalization keeps strafe speed
    /// independent of the angle between front and up.
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }

    pub fn target(&self) -> Vec3 {
        self.position + self.front
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.target(), self.up);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(camera.front, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.up, Vec3::Y);
        assert!((camera.fov_y - 45f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_right_is_unit_even_for_drifted_front() {
        let mut camera = Camera::new(800, 600);
        // Simulate front drifting off unit length after turning
        camera.front = Vec3::new(0.7, 0.0, -1.0);
        assert!((camera.right().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_proj_is_finite() {
        let camera = Camera::new(800, 600);
        let vp = camera.view_proj();
        assert!(vp.to_cols_array().iter().all(|c| c.is_finite()));
    }
}
