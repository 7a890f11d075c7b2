use glam::{Vec2, Vec3};
use octrace_math::Frame;

use crate::Mesh;

/// Raw outcome of a ray-triangle test: which triangle got hit, where along
/// the ray and at which barycentric coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleHit {
    pub triangle: u32,
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl TriangleHit {
    /// Barycentric weights of the triangle's three vertices.
    pub fn barycentric(&self) -> Vec3 {
        Vec3::new(1.0 - self.u - self.v, self.u, self.v)
    }
}

/// Detailed information about the closest surface hit by a ray.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    /// Distance along the ray
    pub t: f32,

    /// Hit position
    pub p: Vec3,

    /// Interpolated texture coordinates, or the barycentric `(u, v)` when
    /// the mesh has none
    pub uv: Vec2,

    /// Frame of the triangle's plane
    pub geo_frame: Frame,

    /// Frame of the interpolated vertex normal (same as `geo_frame` when the
    /// mesh has no normals)
    pub sh_frame: Frame,

    pub triangle: u32,
    pub mesh: &'a Mesh,
}
