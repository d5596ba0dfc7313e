//! Backface culling and painter's-algorithm ordering.
//!
//! There is no depth buffer. Faces are sorted by the mean camera-space Z of
//! their vertices, farthest first, so nearer faces overwrite farther ones.

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::projection::ScreenPoint;
use crate::transform::TransformedVertex;

/// Faces within roughly 80 degrees of facing the camera pass the test.
/// Looser than `> 0` to avoid flicker at grazing angles.
pub const DEFAULT_CULL_THRESHOLD: f32 = 0.175;

/// A face that survived culling, ready to be ordered and drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleFace {
    pub points: Vec<ScreenPoint>,
    pub normal: Vec3,
    pub color: Color,
    /// Mean camera-space Z. Only used for ordering.
    pub depth: f32,
}

/// Why a face did not make it to the draw list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Collinear vertices, so there is no normal.
    Degenerate,
    /// Facing away from the camera.
    BackFacing,
    /// At least one vertex is at or behind the near plane.
    Unprojectable,
}

/// Facing test: `dot(normal, to_camera) > threshold`.
#[inline]
pub fn is_front_facing(normal: Vec3, to_camera: Vec3, threshold: f32) -> bool {
    normal.dot(to_camera) > threshold
}

/// Unit direction from the object center toward the camera, computed once per
/// mesh per frame. `None` when the camera sits on the center.
pub fn direction_to_camera(center: Vec3, camera_position: Vec3) -> Option<Vec3> {
    (camera_position - center).try_normalize()
}

/// Mean camera-space Z of the given vertices.
pub fn average_depth(transformed: &[TransformedVertex], indices: &[usize]) -> f32 {
    let sum: f32 = indices.iter().map(|&i| transformed[i].camera_space.z).sum();
    sum / indices.len() as f32
}

/// Culls the faces of one mesh and returns the survivors in face order,
/// calling `on_reject` for every dropped face.
pub fn visible_faces(
    mesh: &Mesh,
    transformed: &[TransformedVertex],
    camera_position: Vec3,
    threshold: f32,
    mut on_reject: impl FnMut(Rejection),
) -> Vec<VisibleFace> {
    let to_camera = if mesh.backface_culling() {
        direction_to_camera(mesh.center(), camera_position)
    } else {
        None
    };

    let mut visible = Vec::with_capacity(mesh.faces().len());
    for face in mesh.faces() {
        let Some(normal) = face.normal() else {
            on_reject(Rejection::Degenerate);
            continue;
        };

        if let Some(to_camera) = to_camera {
            if !is_front_facing(normal, to_camera, threshold) {
                on_reject(Rejection::BackFacing);
                continue;
            }
        }

        let points: Option<Vec<ScreenPoint>> =
            face.indices().iter().map(|&i| transformed[i].screen).collect();
        let Some(points) = points else {
            on_reject(Rejection::Unprojectable);
            continue;
        };

        visible.push(VisibleFace {
            points,
            normal,
            color: mesh.color(),
            depth: average_depth(transformed, face.indices()),
        });
    }
    visible
}

/// Sorts back to front (largest depth first).
///
/// The sort is stable, so faces at equal depth keep their input order and the
/// draw order does not flicker between frames.
pub fn sort_back_to_front(faces: &mut [VisibleFace]) {
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}
