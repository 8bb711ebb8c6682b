use std::time::Duration;

use glam::{Mat4, Vec3};

pub const CUBE_COUNT: usize = 10;

/// World-space base positions of the cube field.
const CUBE_POSITIONS: [Vec3; CUBE_COUNT] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// Every cube tumbles around the same fixed axis.
const SPIN_AXIS: Vec3 = Vec3::new(1.0, 0.3, 0.5);

/// One drawable cube: a fixed base position and a fixed angular rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeTransform {
    pub position: Vec3,
    spin: f32, // radians per second
}

impl CubeTransform {
    /// Rotation angle after `elapsed` wall-clock time. Deterministic for the
    /// same spin rate and elapsed time.
    pub fn rotation_angle(&self, elapsed: Duration) -> f32 {
        self.spin * elapsed.as_secs_f32()
    }

    pub fn model_matrix(&self, elapsed: Duration) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_axis_angle(SPIN_AXIS.normalize(), self.rotation_angle(elapsed))
    }
}

/// The fixed field of spinning cubes. Populated once at startup from a seeded
/// RNG and immutable afterwards; only the time-derived rotation angle varies.
pub struct CubeField {
    cubes: Vec<CubeTransform>,
}

impl CubeField {
    pub fn new(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let cubes = CUBE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let roll = rng.u32(1..=360) as f32;
                // The index scales the rate, so the first cube stays still
                let spin = 2.0 * i as f32 * roll / 2.0;
                CubeTransform { position, spin }
            })
            .collect();
        Self { cubes }
    }

    pub fn cubes(&self) -> &[CubeTransform] {
        &self.cubes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_has_fixed_size() {
        let field = CubeField::new(7);
        assert_eq!(field.cubes().len(), CUBE_COUNT);
        assert_eq!(field.cubes()[1].position, Vec3::new(2.0, 5.0, -15.0));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = CubeField::new(1234);
        let b = CubeField::new(1234);
        assert_eq!(a.cubes(), b.cubes());
    }

    #[test]
    fn test_rotation_angle_is_deterministic() {
        let field = CubeField::new(99);
        let t = Duration::from_millis(2500);
        for cube in field.cubes() {
            assert_eq!(cube.rotation_angle(t), cube.rotation_angle(t));
        }
        // No elapsed time, no rotation
        assert_eq!(field.cubes()[5].rotation_angle(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_first_cube_never_spins() {
        let field = CubeField::new(42);
        let angle = field.cubes()[0].rotation_angle(Duration::from_secs(60));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_spin_rates_are_bounded() {
        let field = CubeField::new(8);
        for (i, cube) in field.cubes().iter().enumerate() {
            let angle = cube.rotation_angle(Duration::from_secs(1));
            // roll is in 1..=360, so the per-second angle is at most i * 360
            assert!(angle >= 0.0);
            assert!(angle <= i as f32 * 360.0);
        }
    }
}
