use glam::{Vec2, Vec3};

/// A free-standing triangle, used to assemble meshes from triangle soups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshTriangle {
    positions: [Vec3; 3],
    normals: Option<[Vec3; 3]>,
    uvs: Option<[Vec2; 3]>,
}

impl MeshTriangle {
    pub fn with_positions(mut self, positions: [impl Into<Vec3>; 3]) -> Self {
        self.positions = positions.map(Into::into);
        self
    }

    pub fn with_normals(mut self, normals: [impl Into<Vec3>; 3]) -> Self {
        self.normals = Some(normals.map(Into::into));
        self
    }

    pub fn with_uvs(mut self, uvs: [impl Into<Vec2>; 3]) -> Self {
        self.uvs = Some(uvs.map(Into::into));
        self
    }

    pub fn positions(&self) -> [Vec3; 3] {
        self.positions
    }

    pub fn normals(&self) -> Option<[Vec3; 3]> {
        self.normals
    }

    pub fn uvs(&self) -> Option<[Vec2; 3]> {
        self.uvs
    }
}
