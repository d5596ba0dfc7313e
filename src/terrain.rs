//! Flat terrain grid and the height query the camera is clamped against.

use crate::colors;
use crate::math::vec3::Vec3;
use crate::mesh::{edges_from_faces, Mesh, MeshError};

/// Height lookup consumed by the frame assembler to keep the camera above
/// the ground.
pub trait HeightField {
    /// World Y of the surface at `(x, z)`. The world is Y-down, so the
    /// camera must stay at a smaller Y than this.
    fn height_at(&self, x: f32, z: f32) -> f32;

    /// Whether `position` is at or below the surface.
    fn is_colliding(&self, position: Vec3) -> bool {
        position.y >= self.height_at(position.x, position.z)
    }
}

/// Square, flat grid of `grid_size x grid_size` cells split into triangles.
#[derive(Debug, Clone)]
pub struct FlatTerrain {
    size: f32,
    height: f32,
    grid_size: usize,
    mesh: Mesh,
}

impl FlatTerrain {
    pub fn new(size: f32, height: f32, grid_size: usize) -> Result<Self, MeshError> {
        let grid_size = grid_size.max(1);
        let half_size = size / 2.0;
        let cell_size = size / grid_size as f32;
        let row = grid_size + 1;

        let mut vertices = Vec::with_capacity(row * row);
        for z in 0..row {
            for x in 0..row {
                vertices.push(Vec3::new(
                    x as f32 * cell_size - half_size,
                    height,
                    z as f32 * cell_size - half_size,
                ));
            }
        }

        let mut faces = Vec::with_capacity(2 * grid_size * grid_size);
        for z in 0..grid_size {
            for x in 0..grid_size {
                let v0 = z * row + x;
                let v1 = z * row + x + 1;
                let v2 = (z + 1) * row + x + 1;
                let v3 = (z + 1) * row + x;
                faces.push(vec![v0, v1, v2]);
                faces.push(vec![v0, v2, v3]);
            }
        }

        let edges = edges_from_faces(&faces);
        // Every face points up, and the camera is kept above the surface, so
        // the object-center facing test would only reject ground seen at a
        // shallow angle.
        let mesh = Mesh::new("terrain", vertices, edges, faces)?
            .with_color(colors::TERRAIN)
            .with_center(Vec3::new(0.0, height, 0.0))
            .with_backface_culling(false);

        Ok(Self {
            size,
            height,
            grid_size,
            mesh,
        })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl HeightField for FlatTerrain {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_has_expected_counts() {
        let terrain = FlatTerrain::new(100.0, 10.0, 10).unwrap();
        assert_eq!(terrain.mesh().vertices().len(), 11 * 11);
        assert_eq!(terrain.mesh().faces().len(), 2 * 10 * 10);
        // 10x11 horizontal, 11x10 vertical and 10x10 diagonals.
        assert_eq!(terrain.mesh().edges().len(), 110 + 110 + 100);
    }

    #[test]
    fn grid_spans_size_at_height() {
        let terrain = FlatTerrain::new(100.0, 10.0, 10).unwrap();
        let vertices = terrain.mesh().vertices();
        assert_eq!(vertices[0], Vec3::new(-50.0, 10.0, -50.0));
        assert_eq!(vertices[vertices.len() - 1], Vec3::new(50.0, 10.0, 50.0));
        assert!(vertices.iter().all(|v| v.y == 10.0));
    }

    #[test]
    fn faces_point_up() {
        let terrain = FlatTerrain::new(20.0, 3.0, 4).unwrap();
        for face in terrain.mesh().faces() {
            let normal = face.normal().unwrap();
            assert_relative_eq!(normal.dot(Vec3::UP), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn height_is_flat_and_collision_is_at_surface() {
        let terrain = FlatTerrain::new(100.0, 10.0, 10).unwrap();
        assert_eq!(terrain.height_at(-30.0, 42.0), 10.0);
        assert!(terrain.is_colliding(Vec3::new(0.0, 10.0, 0.0)));
        assert!(terrain.is_colliding(Vec3::new(0.0, 12.0, 0.0)));
        assert!(!terrain.is_colliding(Vec3::new(0.0, 9.0, 0.0)));
    }
}
