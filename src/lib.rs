//! A minimal real-time 3D renderer core.
//!
//! A free-flying camera looks at a fixed scene. Every frame the core moves the
//! camera, transforms and projects the scene, culls and depth-orders its faces
//! and hands the resulting 2D primitives to a presentation layer. SDL2 is only
//! used by that layer for window management and display; all rasterization is
//! done on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use flycam::prelude::*;
//!
//! let config = Config::default();
//! let mut camera = config.camera();
//! let engine = config.engine();
//! let scene = config.scene()?;
//!
//! let frame = engine.frame(&mut camera, &scene, 1.0 / 60.0, &InputIntent::IDLE);
//! let mut renderer = Renderer::new(800, 600);
//! renderer.draw(&frame);
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod input;
pub mod light;
pub mod math;
pub mod mesh;
pub mod primitive;
pub mod projection;
pub mod render;
pub mod scene;
pub mod terrain;
pub mod transform;
pub mod visibility;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use camera::{Camera, CameraSettings};
pub use config::{Config, ConfigError};
pub use engine::{Engine, RenderMode, ShadingMode};
pub use mesh::{Mesh, MeshError};
pub use primitive::{Frame, Primitive};
pub use projection::{Projection, ScreenPoint};
pub use scene::Scene;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use flycam::prelude::*;
/// ```
pub mod prelude {
    // Camera & input
    pub use crate::camera::{Camera, CameraSettings};
    pub use crate::input::InputIntent;

    // Configuration
    pub use crate::config::{Config, ConfigError, ProjectionPolicy};

    // Engine
    pub use crate::engine::{Engine, RenderMode, ShadingMode};
    pub use crate::primitive::{Frame, FrameStats, Primitive};

    // Scene
    pub use crate::colors::Color;
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::Mesh;
    pub use crate::scene::Scene;
    pub use crate::terrain::{FlatTerrain, HeightField};

    // Projection
    pub use crate::projection::{Projection, ProjectionKind, ScreenPoint};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::Renderer;

    // Window & Input
    pub use crate::window::{FpsCounter, FrameLimiter, Window, WindowEvents, CONTROLS};
}
