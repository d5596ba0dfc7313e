//! Single directional light for optional flat shading.

use serde::{Deserialize, Serialize};

use crate::colors::Color;
use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// The direction the light travels (not where it comes from).
    pub direction: Vec3,
    /// Brightness floor for faces turned away from the light.
    pub ambient_intensity: f32,
}

impl Default for DirectionalLight {
    /// Light shining from the start pose toward the scene.
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction is normalized; a zero vector falls back to +Z.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.try_normalize().unwrap_or(Vec3::FORWARD),
            ambient_intensity: 0.1,
        }
    }

    /// Lambert term in `[0, 1]` for a unit surface normal.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction).dot(normal).max(0.0)
    }

    /// Flat-shaded face color: `ambient + (1 - ambient) * intensity`.
    pub fn shade(&self, color: Color, normal: Vec3) -> Color {
        let ambient = self.ambient_intensity.clamp(0.0, 1.0);
        color.scaled(ambient + (1.0 - ambient) * self.intensity(normal))
    }
}
