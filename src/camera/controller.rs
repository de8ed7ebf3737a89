use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLAR_EPSILON: f32 = 1e-3;

/// Orbit-style drag controller around a look-at target.
///
/// Rotation, pan and zoom requests accumulate as pending deltas and are
/// folded into the camera in [`update`](Self::update), once per frame.
/// With damping enabled only a fraction of each pending delta is applied
/// per update and the rest decays, so the view keeps gliding briefly
/// after the drag stops.
///
/// The eye position is re-read on every update, which lets other
/// subsystems (camera flights, resize dolly) move the eye directly.
pub struct CameraController {
    /// The controlled camera.
    pub camera: Camera,

    /// Pending (azimuth, polar) rotation in radians.
    rotate_delta: Vec2,
    /// Pending world-space translation of the target.
    pan_delta: Vec3,
    /// Pending radius multiplier (1 = no zoom).
    zoom_scale: f32,

    viewport_height: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    enable_damping: bool,
    damping_factor: f32,
    min_distance: f32,
    max_distance: f32,
}

impl CameraController {
    /// Create a controller at the configured start position for a
    /// viewport of the given pixel size.
    #[must_use]
    pub fn new(options: &CameraOptions, width: u32, height: u32) -> Self {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let mut controller = Self {
            camera: Camera::from_options(options, aspect),
            rotate_delta: Vec2::ZERO,
            pan_delta: Vec3::ZERO,
            zoom_scale: 1.0,
            viewport_height: height.max(1) as f32,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
        };
        controller.apply_options(options);
        controller
    }

    /// Push option values (projection, speeds, damping, limits).
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.rotate_speed = options.rotate_speed;
        self.pan_speed = options.pan_speed;
        self.zoom_speed = options.zoom_speed;
        self.enable_damping = options.enable_damping;
        self.damping_factor = options.damping_factor.clamp(0.0, 1.0);
        self.min_distance = options.min_distance;
        self.max_distance = options.max_distance.max(options.min_distance);
    }

    /// Update the aspect ratio and the pixel scale of drag gestures.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
            self.viewport_height = height as f32;
        }
    }

    /// Queue a rotation from a drag of `delta` pixels. A drag across the
    /// full viewport height turns the camera once around.
    pub fn rotate(&mut self, delta: Vec2) {
        self.rotate_delta -= TAU * delta * self.rotate_speed / self.viewport_height;
    }

    /// Queue a pan from a drag of `delta` pixels. The target moves so the
    /// point under the cursor stays under the cursor at target depth.
    pub fn pan(&mut self, delta: Vec2) {
        let offset = self.camera.eye - self.camera.target;
        let half_fov = self.camera.fovy.to_radians() * 0.5;
        let target_distance = offset.length() * half_fov.tan();
        let scale = 2.0 * target_distance * self.pan_speed / self.viewport_height;

        let forward = -offset.normalize_or_zero();
        let right = forward.cross(self.camera.up).normalize_or_zero();
        let up = right.cross(forward);
        self.pan_delta += right * (-delta.x * scale) + up * (delta.y * scale);
    }

    /// Queue a zoom (positive = toward the target).
    pub fn zoom(&mut self, delta: f32) {
        let step = 0.95_f32.powf(self.zoom_speed * delta.abs());
        if delta > 0.0 {
            self.zoom_scale *= step;
        } else if delta < 0.0 {
            self.zoom_scale /= step;
        }
    }

    /// Fold pending deltas into the camera. Returns `true` if the eye or
    /// target moved noticeably.
    pub fn update(&mut self) -> bool {
        let before = (self.camera.eye, self.camera.target);
        let offset = self.camera.eye - self.camera.target;
        let mut radius = offset.length();
        let (mut azimuth, mut polar) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI * 0.5)
        };

        let fraction = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        azimuth += self.rotate_delta.x * fraction;
        polar += self.rotate_delta.y * fraction;
        polar = polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        radius = (radius * self.zoom_scale)
            .clamp(self.min_distance, self.max_distance);
        self.camera.target += self.pan_delta * fraction;

        let sin_polar = polar.sin();
        let offset = Vec3::new(
            radius * sin_polar * azimuth.sin(),
            radius * polar.cos(),
            radius * sin_polar * azimuth.cos(),
        );
        self.camera.eye = self.camera.target + offset;

        if self.enable_damping {
            self.rotate_delta *= 1.0 - self.damping_factor;
            self.pan_delta *= 1.0 - self.damping_factor;
        } else {
            self.rotate_delta = Vec2::ZERO;
            self.pan_delta = Vec3::ZERO;
        }
        self.zoom_scale = 1.0;

        before.0.distance_squared(self.camera.eye) > 1e-8
            || before.1.distance_squared(self.camera.target) > 1e-8
    }

    /// Drop pending drag motion.
    pub fn stop(&mut self) {
        self.rotate_delta = Vec2::ZERO;
        self.pan_delta = Vec3::ZERO;
        self.zoom_scale = 1.0;
    }

    /// Stop motion and return to the configured start view.
    pub fn reset(&mut self, options: &CameraOptions) {
        self.stop();
        self.camera.eye = Vec3::from_array(options.position);
        self.camera.target = Vec3::ZERO;
        self.camera.up = Vec3::Y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(damping: bool) -> CameraController {
        let options = CameraOptions {
            enable_damping: damping,
            ..CameraOptions::default()
        };
        CameraController::new(&options, 800, 600)
    }

    #[test]
    fn update_without_input_keeps_eye() {
        let mut c = controller(true);
        let eye = c.camera.eye;
        assert!(!c.update());
        assert!(c.camera.eye.distance(eye) < 1e-5);
    }

    #[test]
    fn rotation_preserves_distance_to_target() {
        let mut c = controller(false);
        let radius = c.camera.eye.length();
        c.rotate(Vec2::new(120.0, 40.0));
        assert!(c.update());
        assert!((c.camera.eye.length() - radius).abs() < 1e-4);
    }

    #[test]
    fn damping_spreads_rotation_over_frames() {
        let mut damped = controller(true);
        let mut direct = controller(false);
        damped.rotate(Vec2::new(100.0, 0.0));
        direct.rotate(Vec2::new(100.0, 0.0));
        let start = damped.camera.eye;
        let _ = damped.update();
        let _ = direct.update();

        let damped_step = damped.camera.eye.distance(start);
        let direct_step = direct.camera.eye.distance(start);
        assert!(damped_step > 0.0);
        assert!(damped_step < direct_step);

        // Keeps gliding without further input.
        let after_first = damped.camera.eye;
        assert!(damped.update());
        assert!(damped.camera.eye.distance(after_first) > 0.0);
    }

    #[test]
    fn polar_angle_never_reaches_the_pole() {
        let mut c = controller(false);
        c.rotate(Vec2::new(0.0, 10_000.0));
        let _ = c.update();
        let dir = (c.camera.eye - c.camera.target).normalize();
        assert!(dir.y.abs() < 1.0);
        assert!(c.camera.eye.is_finite());
    }

    #[test]
    fn zoom_in_moves_closer_and_respects_limits() {
        let mut c = controller(false);
        let radius = c.camera.eye.length();
        c.zoom(1.0);
        let _ = c.update();
        assert!(c.camera.eye.length() < radius);

        for _ in 0..500 {
            c.zoom(5.0);
            let _ = c.update();
        }
        assert!((c.camera.eye.length() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut c = controller(false);
        let offset = c.camera.eye - c.camera.target;
        c.pan(Vec2::new(50.0, 0.0));
        let _ = c.update();
        assert!(c.camera.target.length() > 0.0);
        assert!((c.camera.eye - c.camera.target).distance(offset) < 1e-4);
    }

    #[test]
    fn externally_moved_eye_is_respected() {
        let mut c = controller(true);
        c.camera.eye = Vec3::new(0.0, 1.0, 3.0);
        let _ = c.update();
        assert!(c.camera.eye.distance(Vec3::new(0.0, 1.0, 3.0)) < 1e-4);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut c = controller(false);
        c.pan(Vec2::new(10.0, 10.0));
        c.rotate(Vec2::new(10.0, 10.0));
        let _ = c.update();
        c.reset(&CameraOptions::default());
        assert_eq!(c.camera.eye, Vec3::new(4.0, 2.0, 5.0));
        assert_eq!(c.camera.target, Vec3::ZERO);
        assert!(!c.update());
    }
}
