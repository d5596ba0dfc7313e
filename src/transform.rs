//! World-to-camera and camera-to-screen transforms for a vertex list.
//!
//! The output buffer is built fresh for every call; nothing is cached
//! between frames.

use crate::camera::Camera;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::projection::{Projection, ScreenPoint};

/// One vertex after the camera and projection transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformedVertex {
    pub camera_space: Vec3,
    /// `None` when the vertex is at or behind the near plane.
    pub screen: Option<ScreenPoint>,
}

/// World-to-camera transform captured from a camera for one frame.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
    view: Mat4,
}

impl ViewTransform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix(),
        }
    }

    /// `R * (p - position)`.
    #[inline]
    pub fn to_camera_space(&self, p: Vec3) -> Vec3 {
        self.view * p
    }

    /// Transforms and projects every vertex, in order.
    pub fn transform_vertices(
        &self,
        projection: &Projection,
        vertices: &[Vec3],
    ) -> Vec<TransformedVertex> {
        vertices
            .iter()
            .map(|&p| {
                let camera_space = self.to_camera_space(p);
                TransformedVertex {
                    camera_space,
                    screen: projection.project(camera_space),
                }
            })
            .collect()
    }
}

/// Screen positions of an edge, or `None` when either endpoint has no image
/// or lies beyond the clip bound.
pub fn project_edge(
    transformed: &[TransformedVertex],
    (a, b): (usize, usize),
    clip_bound: i32,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let from = transformed[a].screen?;
    let to = transformed[b].screen?;
    if !from.within(clip_bound) || !to.within(clip_bound) {
        return None;
    }
    Some((from, to))
}
