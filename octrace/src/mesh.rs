use derivative::Derivative;
use glam::{Vec2, Vec3};
use octrace_math::{BoundingBox, Frame, Ray};

use crate::{Error, Intersection, MeshTriangle, Result, TriangleHit};

/// Indexed triangle mesh with optional per-vertex normals and texture
/// coordinates.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct Mesh {
    name: Option<String>,
    bounds: BoundingBox,
    #[derivative(Debug = "ignore")]
    positions: Vec<Vec3>,
    #[derivative(Debug = "ignore")]
    normals: Vec<Vec3>,
    #[derivative(Debug = "ignore")]
    uvs: Vec<Vec2>,
    #[derivative(Debug = "ignore")]
    indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Determinant below which a ray is considered parallel to a triangle.
    const PARALLEL_EPSILON: f32 = 1e-8;

    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Result<Self> {
        if let Some(index) = indices
            .iter()
            .flatten()
            .find(|&&index| index as usize >= positions.len())
        {
            return Err(Error::InvalidMesh(format!(
                "vertex index {index} out of range (vertices = {})",
                positions.len()
            )));
        }

        let this = Self {
            name: None,
            bounds: positions.iter().copied().collect(),
            positions,
            normals: Vec::new(),
            uvs: Vec::new(),
            indices,
        };

        let degenerate = (0..this.triangle_count())
            .filter(|&triangle| this.triangle_area(triangle) == 0.0)
            .count();

        if degenerate > 0 {
            log::warn!(
                "Mesh has {} degenerate triangle(s) out of {}",
                degenerate,
                this.triangle_count()
            );
        }

        Ok(this)
    }

    /// Builds a mesh out of independent triangles; vertices are not shared.
    ///
    /// Either all or none of the triangles must carry normals (and the same
    /// goes for texture coordinates).
    pub fn from_triangles(
        triangles: impl IntoIterator<Item = MeshTriangle>,
    ) -> Result<Self> {
        let triangles: Vec<_> = triangles.into_iter().collect();

        let mut positions = Vec::with_capacity(3 * triangles.len());
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut indices = Vec::with_capacity(triangles.len());

        let with_normals = triangles.first().is_some_and(|t| t.normals().is_some());
        let with_uvs = triangles.first().is_some_and(|t| t.uvs().is_some());

        for (triangle_id, triangle) in triangles.iter().enumerate() {
            let base = positions.len() as u32;

            positions.extend(triangle.positions());
            indices.push([base, base + 1, base + 2]);

            match (with_normals, triangle.normals()) {
                (true, Some(triangle_normals)) => {
                    normals.extend(triangle_normals);
                }
                (false, None) => {
                    //
                }
                _ => {
                    return Err(Error::InvalidMesh(format!(
                        "triangle {triangle_id} disagrees with the first one \
                         about having normals"
                    )));
                }
            }

            match (with_uvs, triangle.uvs()) {
                (true, Some(triangle_uvs)) => {
                    uvs.extend(triangle_uvs);
                }
                (false, None) => {
                    //
                }
                _ => {
                    return Err(Error::InvalidMesh(format!(
                        "triangle {triangle_id} disagrees with the first one \
                         about having texture coordinates"
                    )));
                }
            }
        }

        Self::new(positions, indices)?
            .with_normals(normals)?
            .with_uvs(uvs)
    }

    /// Attaches per-vertex normals; an empty buffer means "no normals".
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Result<Self> {
        if !normals.is_empty() && normals.len() != self.positions.len() {
            return Err(Error::InvalidMesh(format!(
                "got {} normals for {} vertices",
                normals.len(),
                self.positions.len()
            )));
        }

        self.normals = normals;

        Ok(self)
    }

    /// Attaches per-vertex texture coordinates; an empty buffer means "no
    /// texture coordinates".
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Result<Self> {
        if !uvs.is_empty() && uvs.len() != self.positions.len() {
            return Err(Error::InvalidMesh(format!(
                "got {} texture coordinates for {} vertices",
                uvs.len(),
                self.positions.len()
            )));
        }

        self.uvs = uvs;

        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    pub fn triangle_positions(&self, triangle: usize) -> [Vec3; 3] {
        self.indices[triangle].map(|index| self.positions[index as usize])
    }

    pub fn triangle_bounds(&self, triangle: usize) -> BoundingBox {
        BoundingBox::from_points(self.triangle_positions(triangle))
    }

    pub fn triangle_centroid(&self, triangle: usize) -> Vec3 {
        self.triangle_positions(triangle).into_iter().sum::<Vec3>() / 3.0
    }

    pub fn triangle_area(&self, triangle: usize) -> f32 {
        let [p0, p1, p2] = self.triangle_positions(triangle);

        0.5 * (p1 - p0).cross(p2 - p0).length()
    }

    /// Intersects the ray with a single triangle (Möller–Trumbore); hits are
    /// accepted within `ray.mint .. ray.maxt`.
    pub fn ray_intersect(&self, triangle: u32, ray: &Ray) -> Option<TriangleHit> {
        let [p0, p1, p2] = self.triangle_positions(triangle as usize);

        let edge1 = p1 - p0;
        let edge2 = p2 - p0;

        let pvec = ray.direction().cross(edge2);
        let det = edge1.dot(pvec);

        if det.abs() < Self::PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - p0;
        let u = tvec.dot(pvec) * inv_det;

        if u < 0.0 || u > 1.0 {
            return None;
        }

        let qvec = tvec.cross(edge1);
        let v = ray.direction().dot(qvec) * inv_det;

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(qvec) * inv_det;

        ray.contains(t).then_some(TriangleHit { triangle, t, u, v })
    }

    /// Expands a triangle hit into a full intersection record, interpolating
    /// position, texture coordinates and shading normal with the hit's
    /// barycentric coordinates.
    pub fn interpolate(&self, hit: TriangleHit) -> Intersection<'_> {
        let bary = hit.barycentric();
        let [i0, i1, i2] = self.indices[hit.triangle as usize].map(|i| i as usize);
        let [p0, p1, p2] = [self.positions[i0], self.positions[i1], self.positions[i2]];

        let p = bary.x * p0 + bary.y * p1 + bary.z * p2;

        let uv = if self.uvs.is_empty() {
            Vec2::new(hit.u, hit.v)
        } else {
            bary.x * self.uvs[i0] + bary.y * self.uvs[i1] + bary.z * self.uvs[i2]
        };

        let geo_frame = Frame::from_normal((p1 - p0).cross(p2 - p0).normalize());

        let sh_frame = if self.normals.is_empty() {
            geo_frame
        } else {
            Frame::from_normal(
                (bary.x * self.normals[i0]
                    + bary.y * self.normals[i1]
                    + bary.z * self.normals[i2])
                    .normalize(),
            )
        };

        Intersection {
            t: hit.t,
            p,
            uv,
            geo_frame,
            sh_frame,
            triangle: hit.triangle,
            mesh: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec2, vec3};

    use super::*;

    fn triangle() -> Mesh {
        Mesh::new(
            vec![
                vec3(0.0, 0.0, 0.0),
                vec3(1.0, 0.0, 0.0),
                vec3(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn new() {
        let target = triangle();

        assert_eq!(1, target.triangle_count());
        assert_eq!(3, target.vertex_count());
        assert_eq!(Vec3::ZERO, target.bounds().min());
        assert_eq!(vec3(1.0, 1.0, 0.0), target.bounds().max());
        assert_relative_eq!(0.5, target.triangle_area(0));
    }

    #[test]
    fn new_with_invalid_index() {
        let target = Mesh::new(vec![Vec3::ZERO, Vec3::X], vec![[0, 1, 2]]);

        assert!(matches!(target, Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn with_mismatched_buffers() {
        let target = triangle().with_normals(vec![Vec3::Z]);

        assert!(matches!(target, Err(Error::InvalidMesh(_))));

        let target = triangle().with_uvs(vec![Vec2::ZERO; 4]);

        assert!(matches!(target, Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn from_triangles() {
        let target = Mesh::from_triangles([
            MeshTriangle::default()
                .with_positions([Vec3::ZERO, Vec3::X, Vec3::Y])
                .with_uvs([Vec2::ZERO, Vec2::X, Vec2::Y]),
            MeshTriangle::default()
                .with_positions([Vec3::Z, Vec3::X, Vec3::Y])
                .with_uvs([Vec2::ZERO, Vec2::X, Vec2::Y]),
        ])
        .unwrap();

        assert_eq!(2, target.triangle_count());
        assert_eq!(6, target.vertex_count());
        assert_eq!(target.indices(), &[[0u32, 1, 2], [3, 4, 5]]);
        assert!(target.normals().is_empty());
        assert_eq!(6, target.uvs().len());

        let target = Mesh::from_triangles([
            MeshTriangle::default()
                .with_positions([Vec3::ZERO, Vec3::X, Vec3::Y])
                .with_normals([Vec3::Z; 3]),
            MeshTriangle::default().with_positions([Vec3::Z, Vec3::X, Vec3::Y]),
        ]);

        assert!(matches!(target, Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn ray_intersect() {
        let target = triangle();

        let ray = Ray::new(vec3(0.25, 0.25, 1.0), -Vec3::Z);
        let hit = target.ray_intersect(0, &ray).unwrap();

        assert_eq!(0, hit.triangle);
        assert_relative_eq!(1.0, hit.t);
        assert_relative_eq!(0.25, hit.u);
        assert_relative_eq!(0.25, hit.v);

        // Missing the triangle
        let ray = Ray::new(vec3(0.75, 0.75, 1.0), -Vec3::Z);

        assert!(target.ray_intersect(0, &ray).is_none());

        // Parallel to the triangle
        let ray = Ray::new(vec3(-1.0, 0.25, 0.0), Vec3::X);

        assert!(target.ray_intersect(0, &ray).is_none());

        // Triangle lies beyond `maxt`
        let ray = Ray::new(vec3(0.25, 0.25, 1.0), -Vec3::Z).with_maxt(0.5);

        assert!(target.ray_intersect(0, &ray).is_none());

        // Triangle lies behind the origin
        let ray = Ray::new(vec3(0.25, 0.25, 1.0), Vec3::Z);

        assert!(target.ray_intersect(0, &ray).is_none());
    }

    #[test]
    fn interpolate() {
        let target = triangle()
            .with_normals(vec![Vec3::Z, Vec3::Z, vec3(0.0, 1.0, 1.0)])
            .unwrap()
            .with_uvs(vec![vec2(0.0, 0.0), vec2(2.0, 0.0), vec2(0.0, 4.0)])
            .unwrap();

        let ray = Ray::new(vec3(0.25, 0.5, 2.0), -Vec3::Z);
        let hit = target.ray_intersect(0, &ray).unwrap();
        let its = target.interpolate(hit);

        assert_relative_eq!(2.0, its.t);
        assert!(its.p.abs_diff_eq(vec3(0.25, 0.5, 0.0), 1e-6));
        assert!(its.uv.abs_diff_eq(vec2(0.5, 2.0), 1e-6));
        assert!(its.geo_frame.n.abs_diff_eq(Vec3::Z, 1e-6));

        // 0.25 * Z + 0.25 * Z + 0.5 * (Y + Z), normalized
        assert!(its.sh_frame.n.abs_diff_eq(vec3(0.0, 0.5, 1.0).normalize(), 1e-6));
        assert_eq!(0, its.triangle);
    }

    #[test]
    fn interpolate_without_normals() {
        let target = triangle();
        let ray = Ray::new(vec3(0.1, 0.2, -1.0), Vec3::Z);
        let its = target.interpolate(target.ray_intersect(0, &ray).unwrap());

        assert_eq!(its.geo_frame, its.sh_frame);
        assert!(its.uv.abs_diff_eq(vec2(0.1, 0.2), 1e-6));
    }
}
