//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is a
//! valid configuration. Missing sections and keys fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::camera::{Camera, CameraSettings};
use crate::colors::{self, Color};
use crate::engine::{Engine, RenderMode, ShadingMode};
use crate::light::DirectionalLight;
use crate::mesh::{Mesh, MeshError};
use crate::projection::{Projection, ProjectionKind};
use crate::scene::Scene;
use crate::terrain::FlatTerrain;
use crate::visibility::DEFAULT_CULL_THRESHOLD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("failed to build scene: {0}")]
    Mesh(#[from] MeshError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraSettings,
    pub projection: ProjectionConfig,
    pub render: RenderConfig,
    pub terrain: TerrainConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps_cap: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "flycam".to_string(),
            width: 800,
            height: 600,
            fps_cap: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionPolicy {
    #[default]
    Pinhole,
    Perspective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub kind: ProjectionPolicy,
    /// Pixels, pinhole only.
    pub focal_length: f32,
    /// Degrees, perspective only.
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            kind: ProjectionPolicy::Pinhole,
            focal_length: 200.0,
            fov_y_degrees: 60.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub shading: ShadingMode,
    pub light: DirectionalLight,
    pub cull_threshold: f32,
    pub edge_clip: i32,
    pub line_width: u32,
    pub background: Color,
    pub wireframe: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Wireframe,
            shading: ShadingMode::None,
            light: DirectionalLight::default(),
            cull_threshold: DEFAULT_CULL_THRESHOLD,
            edge_clip: 10_000,
            line_width: 2,
            background: colors::BACKGROUND,
            wireframe: colors::WIREFRAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub enabled: bool,
    pub size: f32,
    pub height: f32,
    pub grid_size: usize,
    /// Minimum distance between the camera and the ground.
    pub safety_margin: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            size: 100.0,
            height: 10.0,
            grid_size: 10,
            safety_margin: 1.0,
        }
    }
}

impl Config {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                window.width, window.height
            )));
        }
        if window.fps_cap == 0 {
            return Err(ConfigError::Invalid("fps_cap must be non-zero".to_string()));
        }

        positive("camera.move_speed", self.camera.move_speed)?;
        positive("camera.turn_speed", self.camera.turn_speed)?;
        let margin = self.camera.pitch_margin;
        if !(0.0..std::f32::consts::FRAC_PI_2).contains(&margin) {
            return Err(ConfigError::Invalid(format!(
                "camera.pitch_margin must be in [0, pi/2), got {margin}"
            )));
        }
        let (min_pitch, max_pitch) = self.camera.pitch_limits();
        let start_pitch = self.camera.start_pitch;
        if !(min_pitch..=max_pitch).contains(&start_pitch) {
            return Err(ConfigError::Invalid(format!(
                "camera.start_pitch must be in [{min_pitch}, {max_pitch}], got {start_pitch}"
            )));
        }

        let projection = &self.projection;
        positive("projection.z_near", projection.z_near)?;
        match projection.kind {
            ProjectionPolicy::Pinhole => positive("projection.focal_length", projection.focal_length)?,
            ProjectionPolicy::Perspective => {
                if !(projection.fov_y_degrees > 0.0 && projection.fov_y_degrees < 180.0) {
                    return Err(ConfigError::Invalid(format!(
                        "projection.fov_y_degrees must be in (0, 180), got {}",
                        projection.fov_y_degrees
                    )));
                }
                if projection.z_near >= projection.z_far {
                    return Err(ConfigError::Invalid(format!(
                        "projection.z_near ({}) must be less than z_far ({})",
                        projection.z_near, projection.z_far
                    )));
                }
            }
        }

        if self.render.edge_clip <= 0 {
            return Err(ConfigError::Invalid(format!(
                "render.edge_clip must be positive, got {}",
                self.render.edge_clip
            )));
        }
        if self.render.line_width == 0 {
            return Err(ConfigError::Invalid("render.line_width must be non-zero".to_string()));
        }

        if self.terrain.enabled {
            positive("terrain.size", self.terrain.size)?;
            if self.terrain.grid_size == 0 {
                return Err(ConfigError::Invalid("terrain.grid_size must be non-zero".to_string()));
            }
            if self.terrain.safety_margin < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "terrain.safety_margin must not be negative, got {}",
                    self.terrain.safety_margin
                )));
            }
        }

        Ok(())
    }

    pub fn projection(&self) -> Projection {
        let p = &self.projection;
        let (width, height) = (self.window.width, self.window.height);
        match p.kind {
            ProjectionPolicy::Pinhole => Projection::new(
                ProjectionKind::Pinhole {
                    focal_length: p.focal_length,
                },
                width,
                height,
                p.z_near,
                p.z_far,
            ),
            ProjectionPolicy::Perspective => {
                Projection::from_degrees(p.fov_y_degrees, width, height, p.z_near, p.z_far)
            }
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.camera)
    }

    pub fn engine(&self) -> Engine {
        let render = &self.render;
        let mut engine = Engine::new(self.projection());
        engine.set_render_mode(render.mode);
        engine.set_shading_mode(render.shading);
        let mut light = DirectionalLight::new(render.light.direction);
        light.ambient_intensity = render.light.ambient_intensity;
        engine.set_light(light);
        engine.set_cull_threshold(render.cull_threshold);
        engine.set_edge_clip(render.edge_clip);
        engine.set_line_width(render.line_width);
        engine.set_wireframe_color(render.wireframe);
        engine.set_floor_margin(self.terrain.safety_margin);
        engine
    }

    /// The demo scene: one cube, plus the ground when terrain is enabled.
    pub fn scene(&self) -> Result<Scene, ConfigError> {
        let mut scene = Scene::new().with_mesh(Mesh::cube());
        if self.terrain.enabled {
            let t = &self.terrain;
            scene = scene.with_terrain(FlatTerrain::new(t.size, t.height, t.grid_size)?);
        }
        Ok(scene)
    }
}
