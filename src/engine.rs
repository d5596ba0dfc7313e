//! Frame assembly.
//!
//! The [`Engine`] holds only configuration. Each call to [`Engine::frame`]
//! integrates the camera for one tick, pushes the scene through the
//! transform pipeline, culls and orders faces, and returns the primitives to
//! draw. The camera is the only state carried from one frame to the next.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::camera::Camera;
use crate::colors::{self, Color};
use crate::input::InputIntent;
use crate::light::DirectionalLight;
use crate::primitive::{Frame, FrameStats, Primitive};
use crate::projection::Projection;
use crate::scene::Scene;
use crate::transform::{project_edge, ViewTransform};
use crate::visibility::{self, sort_back_to_front, VisibleFace, DEFAULT_CULL_THRESHOLD};

/// Rendering mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Edges only, no culling.
    #[default]
    Wireframe,
    /// Culled, depth-sorted faces only.
    Filled,
    /// Culled, depth-sorted faces with every edge drawn on top.
    FilledWireframe,
}

impl RenderMode {
    /// `(draw_filled, draw_wireframe)`
    fn layers(self) -> (bool, bool) {
        match self {
            RenderMode::Wireframe => (false, true),
            RenderMode::Filled => (true, false),
            RenderMode::FilledWireframe => (true, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    /// Faces use their mesh color.
    #[default]
    None,
    /// Faces are darkened by the angle to a single directional light.
    Flat,
}

pub struct Engine {
    projection: Projection,
    render_mode: RenderMode,
    shading_mode: ShadingMode,
    light: DirectionalLight,
    cull_threshold: f32,
    /// Edges with an endpoint beyond this absolute screen coordinate are
    /// dropped.
    edge_clip: i32,
    line_width: u32,
    wireframe_color: Color,
    /// Distance kept between the camera and the terrain surface.
    floor_margin: f32,
}

impl Engine {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            render_mode: RenderMode::default(),
            shading_mode: ShadingMode::default(),
            light: DirectionalLight::default(),
            cull_threshold: DEFAULT_CULL_THRESHOLD,
            edge_clip: 10_000,
            line_width: 2,
            wireframe_color: colors::WIREFRAME,
            floor_margin: 1.0,
        }
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        self.shading_mode = mode;
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading_mode
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn set_cull_threshold(&mut self, threshold: f32) {
        self.cull_threshold = threshold;
    }

    pub fn set_edge_clip(&mut self, bound: i32) {
        self.edge_clip = bound;
    }

    pub fn set_line_width(&mut self, width: u32) {
        self.line_width = width;
    }

    pub fn set_wireframe_color(&mut self, color: Color) {
        self.wireframe_color = color;
    }

    pub fn set_floor_margin(&mut self, margin: f32) {
        self.floor_margin = margin;
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
    }

    /// Runs one tick: applies `input` to `camera` over `dt` seconds, then
    /// renders the scene from the updated pose.
    pub fn frame(
        &self,
        camera: &mut Camera,
        scene: &Scene,
        dt: f32,
        input: &InputIntent,
    ) -> Frame {
        camera.move_relative(input.forward, input.right, input.up, dt);
        camera.rotate(input.yaw, input.pitch, dt);

        if input.reset_rotation {
            camera.reset_rotation();
            debug!("camera rotation reset");
        }
        if input.reset_position {
            camera.reset_position();
            debug!("camera position reset");
        }

        if let Some(ground) = scene.height_field() {
            let p = camera.position();
            if ground.is_colliding(p) {
                debug!(x = p.x, y = p.y, z = p.z, "camera hit the ground");
            }
            camera.clamp_to_floor(ground.height_at(p.x, p.z) - self.floor_margin);
        }

        self.render(camera, scene)
    }

    /// Projects the scene from the camera's current pose without moving it.
    pub fn render(&self, camera: &Camera, scene: &Scene) -> Frame {
        let (draw_filled, draw_wireframe) = self.render_mode.layers();
        let view = ViewTransform::from_camera(camera);
        let mut stats = FrameStats::default();
        let mut faces: Vec<VisibleFace> = Vec::new();
        let mut lines = Vec::new();

        for mesh in scene.meshes() {
            // Fresh per-frame buffer; never reused across frames.
            let transformed = view.transform_vertices(&self.projection, mesh.vertices());

            if draw_filled {
                stats.faces += mesh.faces().len();
                faces.extend(visibility::visible_faces(
                    mesh,
                    &transformed,
                    camera.position(),
                    self.cull_threshold,
                    |rejection| stats.record(rejection),
                ));
            }

            if draw_wireframe {
                for &edge in mesh.edges() {
                    match project_edge(&transformed, edge, self.edge_clip) {
                        Some((from, to)) => lines.push(Primitive::Line {
                            from,
                            to,
                            color: self.wireframe_color,
                            width: self.line_width,
                        }),
                        None => stats.edges_dropped += 1,
                    }
                }
            }
        }

        sort_back_to_front(&mut faces);
        stats.polygons = faces.len();
        stats.lines = lines.len();

        let mut primitives = Vec::with_capacity(faces.len() + lines.len());
        primitives.extend(faces.into_iter().map(|face| Primitive::Polygon {
            color: self.face_color(&face),
            points: face.points,
        }));
        primitives.extend(lines);

        trace!(
            faces = stats.faces,
            culled = stats.faces_culled,
            unprojectable = stats.faces_unprojectable,
            polygons = stats.polygons,
            lines = stats.lines,
            edges_dropped = stats.edges_dropped,
            "frame assembled"
        );

        Frame { primitives, stats }
    }

    fn face_color(&self, face: &VisibleFace) -> Color {
        match self.shading_mode {
            ShadingMode::None => face.color,
            ShadingMode::Flat => self.light.shade(face.color, face.normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use crate::math::vec3::Vec3;
    use crate::projection::ScreenPoint;
    use crate::terrain::{FlatTerrain, HeightField};
    use approx::assert_relative_eq;

    fn engine(mode: RenderMode) -> Engine {
        let mut engine = Engine::new(Projection::pinhole(200.0, 800, 600, 0.1));
        engine.set_render_mode(mode);
        engine
    }

    #[test]
    fn wireframe_start_pose_golden() {
        let mut camera = Camera::default();
        let frame = engine(RenderMode::Wireframe).frame(
            &mut camera,
            &Scene::cube(),
            0.016,
            &InputIntent::IDLE,
        );

        assert_eq!(frame.stats.lines, 12);
        assert_eq!(frame.polygons().count(), 0);
        let (from, to) = frame.lines().next().unwrap();
        assert_eq!(from, ScreenPoint::new(350, 250));
        assert_eq!(to, ScreenPoint::new(450, 250));
        assert!(frame.primitives.iter().all(|p| matches!(
            p,
            Primitive::Line { width: 2, color, .. } if *color == colors::WIREFRAME
        )));
    }

    #[test]
    fn filled_start_pose_draws_front_face() {
        let mut camera = Camera::default();
        let frame = engine(RenderMode::Filled).frame(
            &mut camera,
            &Scene::cube(),
            0.016,
            &InputIntent::IDLE,
        );

        let polygons: Vec<_> = frame.polygons().collect();
        assert_eq!(polygons.len(), 1);
        assert_eq!(
            polygons[0].0,
            &[
                ScreenPoint::new(350, 250),
                ScreenPoint::new(350, 350),
                ScreenPoint::new(450, 350),
                ScreenPoint::new(450, 250),
            ]
        );
        assert_eq!(polygons[0].1, colors::CUBE);
        assert_eq!(frame.stats.faces_culled, 5);
        assert_eq!(frame.lines().count(), 0);
    }

    #[test]
    fn filled_wireframe_draws_polygons_before_lines() {
        let mut camera = Camera::new(CameraSettings {
            start_position: Vec3::new(-4.0, -4.0, -4.0),
            ..CameraSettings::default()
        });
        // Look at the origin.
        camera.rotate(-std::f32::consts::FRAC_PI_4 / 1.5, 0.615 / 1.5, 1.0);

        let frame = engine(RenderMode::FilledWireframe).render(&camera, &Scene::cube());
        assert_eq!(frame.stats.polygons, 3);
        assert_eq!(frame.stats.lines, 12);
        let first_line = frame
            .primitives
            .iter()
            .position(|p| matches!(p, Primitive::Line { .. }))
            .unwrap();
        assert_eq!(first_line, 3);
    }

    #[test]
    fn polygons_are_ordered_back_to_front_across_meshes() {
        use crate::mesh::{Mesh, CUBE_EDGES, CUBE_FACES, CUBE_VERTICES};

        let far_color = Color::rgb(200, 40, 40);
        let far = Mesh::new(
            "far",
            CUBE_VERTICES.iter().map(|&v| v + Vec3::new(0.0, 0.0, 4.0)).collect(),
            CUBE_EDGES.to_vec(),
            CUBE_FACES.iter().map(|f| f.to_vec()).collect(),
        )
        .unwrap()
        .with_color(far_color);
        // Inserted after the near cube but must be drawn first.
        let scene = Scene::cube().with_mesh(far);

        let frame = engine(RenderMode::Filled).render(&Camera::default(), &scene);
        let order: Vec<Color> = frame.polygons().map(|(_, color)| color).collect();
        assert_eq!(order, vec![far_color, colors::CUBE]);
    }

    #[test]
    fn near_edges_beyond_clip_bound_are_dropped() {
        let mut camera = Camera::new(CameraSettings {
            start_position: Vec3::new(0.0, 0.0, -1.05),
            ..CameraSettings::default()
        });
        let mut engine = Engine::new(Projection::pinhole(200.0, 800, 600, 0.01));
        engine.set_edge_clip(1000);

        let frame = engine.frame(&mut camera, &Scene::cube(), 0.0, &InputIntent::IDLE);
        // Only the far face survives; the near face and the connecting edges
        // all touch a vertex projected thousands of pixels off screen.
        assert_eq!(frame.stats.lines, 4);
        assert_eq!(frame.stats.edges_dropped, 8);
        for (from, to) in frame.lines() {
            assert!(from.within(1000) && to.within(1000));
        }
    }

    #[test]
    fn edges_behind_the_camera_are_dropped() {
        let mut camera = Camera::default();
        let turn_around = InputIntent {
            yaw: 1.0,
            ..InputIntent::IDLE
        };
        let dt = std::f32::consts::PI / camera.settings().turn_speed;
        let frame = engine(RenderMode::Wireframe).frame(&mut camera, &Scene::cube(), dt, &turn_around);
        assert!(frame.primitives.is_empty());
        assert_eq!(frame.stats.edges_dropped, 12);
    }

    #[test]
    fn movement_scales_with_dt() {
        let engine = engine(RenderMode::Wireframe);
        let scene = Scene::cube();
        let input = InputIntent {
            forward: 1.0,
            right: -1.0,
            ..InputIntent::IDLE
        };

        let mut a = Camera::default();
        let mut b = Camera::default();
        engine.frame(&mut a, &scene, 0.01, &input);
        engine.frame(&mut b, &scene, 0.02, &input);

        let start = Camera::default().position();
        let da = a.position() - start;
        let db = b.position() - start;
        assert_relative_eq!(db.x, 2.0 * da.x, epsilon = 1e-5);
        assert_relative_eq!(db.z, 2.0 * da.z, epsilon = 1e-5);
    }

    #[test]
    fn reset_commands_restore_start_pose_after_motion() {
        let engine = engine(RenderMode::Wireframe);
        let scene = Scene::cube();
        let mut camera = Camera::default();
        let wander = InputIntent {
            forward: 1.0,
            up: -1.0,
            yaw: 1.0,
            pitch: 1.0,
            ..InputIntent::IDLE
        };
        for _ in 0..20 {
            engine.frame(&mut camera, &scene, 0.05, &wander);
        }

        let reset = InputIntent {
            forward: 1.0,
            yaw: 1.0,
            reset_rotation: true,
            reset_position: true,
            ..InputIntent::IDLE
        };
        let frame = engine.frame(&mut camera, &scene, 0.05, &reset);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(frame.lines().next(), Some((ScreenPoint::new(350, 250), ScreenPoint::new(450, 250))));
    }

    #[test]
    fn terrain_keeps_camera_above_surface() {
        let mut engine = engine(RenderMode::Wireframe);
        engine.set_floor_margin(1.5);
        let terrain = FlatTerrain::new(100.0, 10.0, 10).unwrap();
        let scene = Scene::cube().with_terrain(terrain);
        let mut camera = Camera::default();

        let sink = InputIntent {
            up: 1.0,
            ..InputIntent::IDLE
        };
        for _ in 0..10 {
            engine.frame(&mut camera, &scene, 1.0, &sink);
            assert!(camera.position().y <= 8.5);
        }
        assert_eq!(camera.position().y, 8.5);
    }

    #[test]
    fn floor_clamp_resolves_collision() {
        let mut engine = engine(RenderMode::Wireframe);
        engine.set_floor_margin(1.0);
        let terrain = FlatTerrain::new(100.0, 10.0, 10).unwrap();
        let scene = Scene::cube().with_terrain(terrain.clone());
        let mut camera = Camera::default();

        // Start below the surface.
        let sink = InputIntent {
            up: 1.0,
            ..InputIntent::IDLE
        };
        camera.move_relative(0.0, 0.0, 1.0, 4.0);
        assert!(terrain.is_colliding(camera.position()));

        engine.frame(&mut camera, &scene, 0.5, &sink);
        assert!(!terrain.is_colliding(camera.position()));
        assert_eq!(camera.position().y, 9.0);
    }

    #[test]
    fn terrain_faces_are_drawn_unculled() {
        let terrain = FlatTerrain::new(100.0, 10.0, 10).unwrap();
        let scene = Scene::new().with_terrain(terrain);
        // Looking down at the ground from above its center.
        let camera = Camera::new(CameraSettings {
            start_position: Vec3::new(0.0, 0.0, 0.0),
            start_pitch: 1.2,
            ..CameraSettings::default()
        });

        let frame = engine(RenderMode::Filled).render(&camera, &scene);
        assert_eq!(frame.stats.faces, 200);
        assert_eq!(frame.stats.faces_culled, 0);
        assert!(frame.stats.polygons > 0);
        assert_eq!(
            frame.stats.polygons + frame.stats.faces_unprojectable,
            200
        );
        assert!(frame.polygons().all(|(_, color)| color == colors::TERRAIN));
    }

    #[test]
    fn flat_shading_darkens_faces_turned_from_light() {
        let mut engine = engine(RenderMode::Filled);
        engine.set_shading_mode(ShadingMode::Flat);
        engine.set_light(DirectionalLight::new(Vec3::new(1.0, 0.0, 0.0)));

        let frame = engine.render(&Camera::default(), &Scene::cube());
        let (_, color) = frame.polygons().next().unwrap();
        // Front face is perpendicular to the light: ambient only.
        assert_eq!(color, colors::CUBE.scaled(0.1));
    }
}
