//! Camera-space to screen-space projection.
//!
//! The [`Projection`] struct holds the viewport and the projection policy.
//! Two policies are available and a renderer uses exactly one:
//!
//! - [`ProjectionKind::Pinhole`]: divide by depth and scale by a focal
//!   length, `sx = x * f / z + w / 2`.
//! - [`ProjectionKind::Perspective`]: left-handed perspective matrix with a
//!   vertical field of view, followed by the perspective divide and the
//!   NDC-to-viewport mapping.
//!
//! Both reject any point at or behind the near plane.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Integer pixel position. Coordinates are truncated toward zero and may lie
/// outside the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncates a floating-point screen position.
    #[inline]
    pub fn truncate(x: f32, y: f32) -> Self {
        Self::new(x as i32, y as i32)
    }

    /// Whether both coordinates are within `bound` in absolute value.
    /// A negative bound contains nothing.
    #[inline]
    pub fn within(&self, bound: i32) -> bool {
        // Saturated coordinates reach i32::MIN, which has no i32 absolute value.
        u32::try_from(bound)
            .is_ok_and(|bound| self.x.unsigned_abs() <= bound && self.y.unsigned_abs() <= bound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionKind {
    /// Simple pinhole camera with the given focal length in pixels.
    Pinhole { focal_length: f32 },
    /// Perspective matrix with a vertical field of view in radians.
    Perspective { fov_y: f32 },
}

impl Default for ProjectionKind {
    fn default() -> Self {
        ProjectionKind::Pinhole {
            focal_length: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    kind: ProjectionKind,
    width: u32,
    height: u32,
    /// Near plane distance. Points with `z <= z_near` have no image.
    z_near: f32,
    /// Far plane distance (perspective matrix only).
    z_far: f32,
    matrix: Mat4,
}

impl Projection {
    pub fn new(kind: ProjectionKind, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        let mut projection = Self {
            kind,
            width,
            height,
            z_near,
            z_far,
            matrix: Mat4::identity(),
        };
        projection.rebuild_matrix();
        projection
    }

    /// Pinhole projection with the given focal length.
    pub fn pinhole(focal_length: f32, width: u32, height: u32, z_near: f32) -> Self {
        Self::new(
            ProjectionKind::Pinhole { focal_length },
            width,
            height,
            z_near,
            f32::INFINITY,
        )
    }

    /// Perspective projection from a vertical field of view in degrees.
    pub fn from_degrees(
        fov_y_degrees: f32,
        width: u32,
        height: u32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self::new(
            ProjectionKind::Perspective {
                fov_y: fov_y_degrees.to_radians(),
            },
            width,
            height,
            z_near,
            z_far,
        )
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Updates the viewport (typically called on window resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.rebuild_matrix();
    }

    fn rebuild_matrix(&mut self) {
        if let ProjectionKind::Perspective { fov_y } = self.kind {
            self.matrix = Mat4::perspective_lh(fov_y, self.aspect_ratio(), self.z_near, self.z_far);
        }
    }

    /// Projects a camera-space point to the screen.
    ///
    /// Returns `None` when the point is at or behind the near plane, or when
    /// the homogeneous divisor is zero.
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        if p.z <= self.z_near {
            return None;
        }

        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;

        match self.kind {
            ProjectionKind::Pinhole { focal_length } => {
                let scale = focal_length / p.z;
                Some(ScreenPoint::truncate(
                    p.x * scale + half_w,
                    p.y * scale + half_h,
                ))
            }
            ProjectionKind::Perspective { .. } => {
                // Camera space is Y-down, NDC is Y-up.
                let clip = self.matrix * Vec4::point(Vec3::new(p.x, -p.y, p.z));
                let ndc = clip.perspective_divide()?;
                Some(ScreenPoint::truncate(
                    (ndc.x + 1.0) * half_w,
                    (1.0 - ndc.y) * half_h,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn pinhole_golden_value() {
        // Cube corner (-1, -1, -1) seen from (0, 0, -5) lands at (-1, -1, 4).
        let projection = Projection::pinhole(200.0, 800, 600, 0.1);
        assert_eq!(
            projection.project(Vec3::new(-1.0, -1.0, 4.0)),
            Some(ScreenPoint::new(350, 250))
        );
    }

    #[test]
    fn points_at_or_behind_near_plane_have_no_image() {
        for projection in [
            Projection::pinhole(200.0, 800, 600, 0.1),
            Projection::from_degrees(60.0, 800, 600, 0.1, 100.0),
        ] {
            assert_eq!(projection.project(Vec3::new(0.0, 0.0, 0.1)), None);
            assert_eq!(projection.project(Vec3::new(1.0, 1.0, 0.0)), None);
            assert_eq!(projection.project(Vec3::new(1.0, 1.0, -3.0)), None);
        }
    }

    #[test]
    fn points_just_past_near_plane_are_finite() {
        for projection in [
            Projection::pinhole(200.0, 800, 600, 0.1),
            Projection::from_degrees(60.0, 800, 600, 0.1, 100.0),
        ] {
            let p = projection.project(Vec3::new(0.5, -0.5, 0.1001)).unwrap();
            assert!(p.x > 400 && p.y < 300);
        }
    }

    #[test]
    fn zero_near_plane_still_rejects_camera_plane() {
        let projection = Projection::pinhole(200.0, 800, 600, 0.0);
        assert_eq!(projection.project(Vec3::new(1.0, 1.0, 0.0)), None);
        assert!(projection.project(Vec3::new(1.0, 1.0, 1e-3)).is_some());
    }

    #[test]
    fn perspective_matches_pinhole_orientation() {
        // A 90 degree vertical FOV on a 600 px tall viewport is a focal
        // length of 300 px.
        let perspective = Projection::new(
            ProjectionKind::Perspective { fov_y: FRAC_PI_2 },
            800,
            600,
            0.1,
            100.0,
        );
        let pinhole = Projection::pinhole(300.0, 800, 600, 0.1);
        for p in [
            Vec3::new(-1.0, -1.0, 4.0),
            Vec3::new(2.0, 0.5, 3.0),
            Vec3::new(0.0, 0.0, 10.0),
        ] {
            let a = perspective.project(p).unwrap();
            let b = pinhole.project(p).unwrap();
            assert!((a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn resize_recenters() {
        let mut projection = Projection::from_degrees(60.0, 800, 600, 0.1, 100.0);
        projection.set_viewport(1024, 768);
        assert_eq!(
            projection.project(Vec3::new(0.0, 0.0, 5.0)),
            Some(ScreenPoint::new(512, 384))
        );
    }

    #[test]
    fn clip_bound_is_inclusive() {
        assert!(ScreenPoint::new(-100, 100).within(100));
        assert!(!ScreenPoint::new(101, 0).within(100));
    }
}
