//! The static geometry drawn every frame.

use crate::mesh::Mesh;
use crate::terrain::{FlatTerrain, HeightField};

#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    terrain: Option<FlatTerrain>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The unit cube on its own.
    pub fn cube() -> Self {
        Self::new().with_mesh(Mesh::cube())
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.meshes.push(mesh);
        self
    }

    pub fn with_terrain(mut self, terrain: FlatTerrain) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn terrain(&self) -> Option<&FlatTerrain> {
        self.terrain.as_ref()
    }

    pub fn height_field(&self) -> Option<&dyn HeightField> {
        self.terrain.as_ref().map(|t| t as &dyn HeightField)
    }

    /// Every mesh to draw: terrain first, then objects in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.terrain.iter().map(FlatTerrain::mesh).chain(self.meshes.iter())
    }
}
