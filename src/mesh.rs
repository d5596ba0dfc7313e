//! Fixed geometry: vertices, wireframe edges and polygon faces.
//!
//! A [`Mesh`] is immutable once built. Faces carry an outward normal derived
//! from their winding at construction time, so the per-frame pipeline never
//! recomputes it.

use thiserror::Error;

use crate::colors::{self, Color};
use crate::math::vec3::Vec3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("face {face} has {len} indices, at least 3 are required")]
    FaceTooSmall { face: usize, len: usize },
    #[error("{element} {index} references vertex {vertex}, but the mesh has {count} vertices")]
    IndexOutOfRange {
        element: &'static str,
        index: usize,
        vertex: usize,
        count: usize,
    },
}

/// Pair of vertex indices.
pub type Edge = (usize, usize);

/// A planar polygon as an ordered loop of vertex indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    indices: Vec<usize>,
    normal: Option<Vec3>,
}

impl Face {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Outward unit normal in object space, `None` for degenerate faces.
    pub fn normal(&self) -> Option<Vec3> {
        self.normal
    }
}

/// Normal of the plane through the first three vertices of a loop,
/// oriented by the right-hand rule: `(v1 - v0) x (v2 - v0)`.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    (v1 - v0).cross(v2 - v0).try_normalize()
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

pub const CUBE_EDGES: [Edge; 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

// Wound so that (v1 - v0) x (v2 - v0) points out of the cube.
pub const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // z = -1
    [4, 5, 6, 7], // z = +1
    [0, 4, 7, 3], // x = -1
    [1, 2, 6, 5], // x = +1
    [0, 1, 5, 4], // y = -1
    [3, 7, 6, 2], // y = +1
];

#[derive(Clone, Debug)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    center: Vec3,
    color: Color,
    backface_culling: bool,
}

impl Mesh {
    /// Builds a mesh, validating every index and deriving face normals.
    ///
    /// The object center defaults to the vertex centroid.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        edges: Vec<Edge>,
        faces: Vec<Vec<usize>>,
    ) -> Result<Self, MeshError> {
        let count = vertices.len();
        let check = |element: &'static str, index: usize, vertex: usize| {
            if vertex < count {
                Ok(())
            } else {
                Err(MeshError::IndexOutOfRange {
                    element,
                    index,
                    vertex,
                    count,
                })
            }
        };

        for (i, &(a, b)) in edges.iter().enumerate() {
            check("edge", i, a)?;
            check("edge", i, b)?;
        }

        let mut built = Vec::with_capacity(faces.len());
        for (i, indices) in faces.into_iter().enumerate() {
            if indices.len() < 3 {
                return Err(MeshError::FaceTooSmall {
                    face: i,
                    len: indices.len(),
                });
            }
            for &vertex in &indices {
                check("face", i, vertex)?;
            }
            let normal = face_normal(
                vertices[indices[0]],
                vertices[indices[1]],
                vertices[indices[2]],
            );
            built.push(Face { indices, normal });
        }

        let center = if vertices.is_empty() {
            Vec3::ZERO
        } else {
            vertices.iter().fold(Vec3::ZERO, |acc, &v| acc + v) / count as f32
        };

        Ok(Self {
            name: name.into(),
            vertices,
            edges,
            faces: built,
            center,
            color: colors::CUBE,
            backface_culling: true,
        })
    }

    /// The 2x2x2 cube centered on the world origin.
    pub fn cube() -> Self {
        Self {
            name: "cube".to_string(),
            vertices: CUBE_VERTICES.to_vec(),
            edges: CUBE_EDGES.to_vec(),
            faces: CUBE_FACES
                .iter()
                .map(|face| Face {
                    indices: face.to_vec(),
                    normal: face_normal(
                        CUBE_VERTICES[face[0]],
                        CUBE_VERTICES[face[1]],
                        CUBE_VERTICES[face[2]],
                    ),
                })
                .collect(),
            center: Vec3::ZERO,
            color: colors::CUBE,
            backface_culling: true,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_backface_culling(mut self, enabled: bool) -> Self {
        self.backface_culling = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn backface_culling(&self) -> bool {
        self.backface_culling
    }
}

/// Unique undirected edges of a set of face loops, each stored as
/// `(min, max)` and listed in first-seen order.
pub fn edges_from_faces(faces: &[Vec<usize>]) -> Vec<Edge> {
    let mut seen = std::collections::HashSet::new();
    let mut edges = Vec::new();
    for face in faces {
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            let edge = (a.min(b), a.max(b));
            if seen.insert(edge) {
                edges.push(edge);
            }
        }
    }
    edges
}
