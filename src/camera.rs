//! Free-flying camera
//!
//! # Coordinate System
//!
//! - X: positive right
//! - Y: positive **down** (matches screen rows, so no flip is needed when
//!   projecting)
//! - Z: positive forward at the start pose (into the screen)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles and converted to a rotation
//! matrix when needed.
//!
//! - **Yaw**: rotation around the world vertical axis
//! - **Pitch**: tilt around the camera's horizontal axis, applied after yaw.
//!   Positive pitch looks down.
//!
//! All motion is scaled by the frame's elapsed time, so the distance covered
//! for a given input does not depend on the frame rate.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Speeds and start pose. Reset commands return the camera to these values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Turn speed in radians per second.
    pub turn_speed: f32,
    pub start_position: Vec3,
    pub start_yaw: f32,
    pub start_pitch: f32,
    /// Distance in radians kept between the pitch and the poles.
    pub pitch_margin: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            turn_speed: 1.5,
            start_position: Vec3::new(0.0, 0.0, -5.0),
            start_yaw: 0.0,
            start_pitch: 0.0,
            pitch_margin: 0.01,
        }
    }
}

impl CameraSettings {
    /// Inclusive pitch range `[-pi/2 + margin, pi/2 - margin]`.
    pub fn pitch_limits(&self) -> (f32, f32) {
        (-FRAC_PI_2 + self.pitch_margin, FRAC_PI_2 - self.pitch_margin)
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    yaw: f32,   // radians, unbounded
    pitch: f32, // radians, always within settings.pitch_limits()
    settings: CameraSettings,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl Camera {
    /// Creates a camera at the configured start pose.
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            position: settings.start_position,
            yaw: settings.start_yaw,
            pitch: settings.start_pitch,
            settings,
        };
        camera.clamp_pitch();
        camera
    }

    // =========================================================================
    // Core: Rotation Matrix
    // =========================================================================

    /// World-to-camera rotation: yaw about the vertical axis first, then
    /// pitch about the resulting horizontal axis (`pitch * yaw`).
    ///
    /// ```text
    /// yaw   = [[ cy, 0, sy], [0, 1, 0], [-sy, 0, cy]]
    /// pitch = [[1, 0, 0], [0, cp, -sp], [0, sp, cp]]
    /// ```
    ///
    /// The order is load-bearing: `yaw * pitch` introduces roll once the
    /// camera has turned.
    pub fn rotation_matrix(&self) -> Mat4 {
        // Mat4 rotations turn the other way, hence the negated angles.
        Mat4::rotation_x(-self.pitch) * Mat4::rotation_y(-self.yaw)
    }

    /// World-to-camera transform: translate by `-position`, then rotate.
    pub fn view_matrix(&self) -> Mat4 {
        let p = self.position;
        self.rotation_matrix() * Mat4::translation(-p.x, -p.y, -p.z)
    }

    // =========================================================================
    // Movement & Rotation
    // =========================================================================

    /// Horizontal basis derived from yaw only, so looking up or down never
    /// makes horizontal movement drift vertically.
    ///
    /// Returns `(forward, right)` where `forward = (sin yaw, 0, -cos yaw)`
    /// and `right = (cos yaw, 0, sin yaw)`.
    pub fn horizontal_basis(&self) -> (Vec3, Vec3) {
        let (sin, cos) = self.yaw.sin_cos();
        (Vec3::new(sin, 0.0, -cos), Vec3::new(cos, 0.0, sin))
    }

    /// Moves relative to the current heading.
    ///
    /// Amounts are signed intents (usually -1, 0 or 1). Positive `forward`
    /// moves along the view direction, positive `right` strafes right and
    /// positive `up` increases Y (which is downward on screen).
    pub fn move_relative(&mut self, forward: f32, right: f32, up: f32, dt: f32) {
        let step = self.settings.move_speed * dt;
        let (forward_dir, right_dir) = self.horizontal_basis();
        self.position += (-forward_dir * forward + right_dir * right) * step;
        self.position.y += up * step;
    }

    /// Turns by signed intents scaled by turn speed and `dt`. Pitch is
    /// clamped after every call.
    pub fn rotate(&mut self, yaw: f32, pitch: f32, dt: f32) {
        let step = self.settings.turn_speed * dt;
        self.yaw += yaw * step;
        self.pitch += pitch * step;
        self.clamp_pitch();
    }

    pub fn reset_rotation(&mut self) {
        self.yaw = self.settings.start_yaw;
        self.pitch = self.settings.start_pitch;
        self.clamp_pitch();
    }

    pub fn reset_position(&mut self) {
        self.position = self.settings.start_position;
    }

    /// Keeps the camera from going below `floor_y` (that is, above it in
    /// world Y, since Y grows downward).
    pub fn clamp_to_floor(&mut self, floor_y: f32) {
        self.position.y = self.position.y.min(floor_y);
    }

    fn clamp_pitch(&mut self) {
        let (min, max) = self.settings.pitch_limits();
        self.pitch = self.pitch.clamp(min, max);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_at_configured_pose() {
        let camera = Camera::default();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn pitch_is_clamped_for_any_input() {
        let mut camera = Camera::default();
        let (min, max) = camera.settings().pitch_limits();

        for (amount, dt) in [(1.0, 10.0), (1.0, 0.016), (-1.0, 1e6), (5.0, 3.0), (-0.3, 0.5)] {
            camera.rotate(0.0, amount, dt);
            assert!(camera.pitch() >= min && camera.pitch() <= max);
        }

        for _ in 0..1000 {
            camera.rotate(0.3, 1.0, 0.05);
        }
        assert_relative_eq!(camera.pitch(), max);
        assert!(camera.pitch() < FRAC_PI_2);
    }

    #[test]
    fn displacement_is_linear_in_dt() {
        let dt = 0.016;
        for (forward, right, up) in [(1.0, 0.0, 0.0), (0.0, -1.0, 0.0), (1.0, 1.0, 1.0)] {
            let mut once = Camera::default();
            once.rotate(0.7, 0.0, 1.0);
            let mut twice = once.clone();
            let start = once.position();

            once.move_relative(forward, right, up, dt);
            twice.move_relative(forward, right, up, 2.0 * dt);

            let single = once.position() - start;
            let double = twice.position() - start;
            assert_relative_eq!(double.x, 2.0 * single.x, epsilon = 1e-5);
            assert_relative_eq!(double.y, 2.0 * single.y, epsilon = 1e-5);
            assert_relative_eq!(double.z, 2.0 * single.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn forward_moves_along_view_direction() {
        let mut camera = Camera::default();
        camera.move_relative(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(camera.position().z, 0.0, epsilon = 1e-5);

        // The moved-along direction maps to camera-space +Z at any yaw.
        let mut turned = Camera::default();
        turned.rotate(1.0, 0.0, 0.4);
        let before = turned.position();
        turned.move_relative(1.0, 0.0, 0.0, 1.0);
        let step = turned.rotation_matrix() * (turned.position() - before);
        assert_relative_eq!(step.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(step.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_does_not_affect_horizontal_movement() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 1.0, 0.5);
        camera.move_relative(1.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(camera.position().y, 0.0);
    }

    #[test]
    fn resets_restore_start_pose() {
        let settings = CameraSettings {
            start_position: Vec3::new(1.0, -2.0, 3.0),
            start_yaw: 0.25,
            start_pitch: -0.5,
            ..CameraSettings::default()
        };
        let mut camera = Camera::new(settings);
        camera.move_relative(1.0, -1.0, 1.0, 3.7);
        camera.rotate(2.0, 1.0, 1.3);

        camera.reset_position();
        camera.reset_rotation();
        assert_eq!(camera.position(), settings.start_position);
        assert_eq!(camera.yaw(), settings.start_yaw);
        assert_eq!(camera.pitch(), settings.start_pitch);

        // Idempotent.
        camera.reset_position();
        camera.reset_rotation();
        assert_eq!(camera.position(), settings.start_position);
    }

    #[test]
    fn rotation_matrix_composes_pitch_after_yaw() {
        let mut camera = Camera::default();
        camera.rotate(0.6, 0.4, 1.0);
        let (yaw, pitch) = (camera.yaw(), camera.pitch());
        let (sy, cy) = yaw.sin_cos();
        let (sp, cp) = pitch.sin_cos();

        let r = camera.rotation_matrix();
        // Row-by-row product of pitch * yaw.
        let expected = [
            [cy, 0.0, sy],
            [sp * sy, cp, -sp * cy],
            [-cp * sy, sp, cp * cy],
        ];
        for (row, values) in expected.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                assert_relative_eq!(r.get(row, col), *value, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn view_matrix_puts_start_target_ahead() {
        let camera = Camera::default();
        let origin = camera.view_matrix() * Vec3::ZERO;
        assert_relative_eq!(origin.z, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn floor_clamp_only_pushes_up() {
        let mut camera = Camera::default();
        camera.move_relative(0.0, 0.0, 1.0, 4.0); // y = 20
        camera.clamp_to_floor(9.0);
        assert_eq!(camera.position().y, 9.0);
        camera.clamp_to_floor(15.0);
        assert_eq!(camera.position().y, 9.0);
    }
}
