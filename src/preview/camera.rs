//! Orbit camera around the hand.

use std::f32::consts::FRAC_PI_4;

use glam::{Mat4, Vec2, Vec3};

pub const FIELD_OF_VIEW: f32 = FRAC_PI_4;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

/// Trackball-style orbit controller with damped motion
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Horizontal angle (radians, 0 = looking down -Z)
    pub azimuth: f32,
    /// Vertical angle (radians, positive = looking down)
    pub elevation: f32,

    pub min_distance: f32,
    pub max_distance: f32,

    /// Radians per point of drag
    pub rotation_speed: f32,
    /// Fraction of the distance per scroll point
    pub zoom_speed: f32,
    /// World units per point of drag, scaled by distance
    pub pan_speed: f32,

    /// Fraction of the remaining velocity lost per frame
    pub damping: f32,

    velocity: Vec2,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Eye starts at (0, 5, 5), looking at the origin.
        let eye = Vec3::new(0.0, 5.0, 5.0);
        Self {
            target: Vec3::ZERO,
            distance: eye.length(),
            azimuth: 0.0,
            elevation: (eye.y / eye.length()).asin(),
            min_distance: 3.0,
            max_distance: 15.0,
            rotation_speed: 0.008,
            zoom_speed: 0.002,
            pan_speed: 0.002,
            damping: 0.05,
            velocity: Vec2::ZERO,
        }
    }
}

impl OrbitCamera {
    /// Rotate by a pointer drag, in points.
    pub fn drag(&mut self, delta: Vec2) {
        self.velocity = delta * self.rotation_speed;
        self.apply_velocity();
    }

    pub fn zoom(&mut self, scroll: f32) {
        let distance = self.distance * (1.0 - scroll * self.zoom_speed);
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }

    pub fn pan(&mut self, delta: Vec2) {
        let right = Vec3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        let scale = self.pan_speed * self.distance;
        self.target -= right * delta.x * scale;
        self.target += Vec3::Y * delta.y * scale;
    }

    /// Let the camera coast after a drag. Returns true while still moving.
    pub fn update(&mut self) -> bool {
        if self.velocity.length_squared() < 1e-8 {
            self.velocity = Vec2::ZERO;
            return false;
        }
        self.velocity *= 1.0 - self.damping;
        self.apply_velocity();
        true
    }

    fn apply_velocity(&mut self) {
        self.azimuth -= self.velocity.x;
        self.elevation = (self.elevation + self.velocity.y).clamp(-1.4, 1.4);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_elev, cos_elev) = self.elevation.sin_cos();
        let (sin_azim, cos_azim) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(
                self.distance * cos_elev * sin_azim,
                self.distance * sin_elev,
                self.distance * cos_elev * cos_azim,
            )
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(FIELD_OF_VIEW, aspect.max(1e-3), NEAR, FAR) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_above_and_in_front() {
        let eye = OrbitCamera::default().eye();
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(eye.y, 5.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = OrbitCamera::default();
        camera.zoom(10_000.0);
        assert_eq!(camera.distance, camera.min_distance);
        camera.zoom(-100_000.0);
        assert_eq!(camera.distance, camera.max_distance);
    }

    #[test]
    fn drag_coasts_to_a_stop() {
        let mut camera = OrbitCamera::default();
        camera.drag(Vec2::new(40.0, 0.0));
        let after_drag = camera.azimuth;
        let mut frames = 0;
        while camera.update() {
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(camera.azimuth < after_drag);
    }
}
