use octrace_math::{BoundingBox, Ray};

use crate::metrics::Elapsed;
use crate::{
    Error, Intersection, Mesh, Octree, OctreeConfig, OctreeStats, Result,
    TraceMode, TriangleHit,
};

/// Ray-intersection accelerator over a single triangle mesh.
///
/// The lifecycle is: register the mesh with [`Self::add_mesh()`], call
/// [`Self::build()`] once, then issue any number of queries; once built, the
/// accelerator is only read, so queries can be issued from many threads at
/// once.
///
/// The `*_brute_force()` variants test every triangle of the mesh and don't
/// need the octree; they're the reference the octree queries must agree with.
#[derive(Debug, Default)]
pub struct Accel {
    config: OctreeConfig,
    mesh: Option<Mesh>,
    bounds: BoundingBox,
    octree: Option<Octree>,
}

impl Accel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OctreeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> Result<()> {
        if self.mesh.is_some() {
            return Err(Error::MultipleMeshes);
        }

        log::debug!(
            "Registering mesh; name = {:?}, triangles = {}, vertices = {}",
            mesh.name(),
            mesh.triangle_count(),
            mesh.vertex_count(),
        );

        self.bounds = mesh.bounds();
        self.mesh = Some(mesh);

        Ok(())
    }

    /// Builds the octree over the registered mesh, replacing the previous
    /// one (if any).
    pub fn build(&mut self) -> Result<&OctreeStats> {
        let mesh = self.mesh.as_ref().ok_or(Error::MissingMesh)?;

        log::info!(
            "Building octree; triangles = {}, max-leaf-size = {}, max-depth = {}",
            mesh.triangle_count(),
            self.config.max_leaf_size,
            self.config.max_depth,
        );

        let octree = Octree::from_mesh(mesh, self.config);
        let stats = octree.stats();

        log::info!(
            "Octree built; leaves = {}, interiors = {}, tt-build = {}",
            stats.leaves,
            stats.interiors,
            Elapsed(octree.build_time()),
        );

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Octree stats: deepest-leaf = {}, largest-leaf = {}, triangle-refs = {}, empty-octants = {}, fingerprint = {:016x}",
                stats.deepest_leaf,
                stats.largest_leaf,
                stats.triangle_refs,
                stats.empty_octants,
                octree.fingerprint(),
            );
        }

        Ok(self.octree.insert(octree).stats())
    }

    pub fn config(&self) -> OctreeConfig {
        self.config
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn octree(&self) -> Option<&Octree> {
        self.octree.as_ref()
    }

    /// Returns the box spanning the registered mesh; unset until a mesh gets
    /// added.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, |mesh| mesh.triangle_count())
    }

    /// Returns the closest surface hit by the ray.
    ///
    /// # Panics
    ///
    /// Panics if [`Self::build()`] hasn't been called yet.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let (mesh, octree) = self.built();

        octree
            .trace(mesh, ray, TraceMode::Nearest)
            .map(|hit| mesh.interpolate(hit))
    }

    /// Returns whether anything blocks the ray within its `mint .. maxt`
    /// range.
    ///
    /// # Panics
    ///
    /// Panics if [`Self::build()`] hasn't been called yet.
    pub fn ray_occluded(&self, ray: &Ray) -> bool {
        let (mesh, octree) = self.built();

        octree.trace(mesh, ray, TraceMode::Any).is_some()
    }

    /// # Panics
    ///
    /// Panics if [`Self::build()`] hasn't been called yet.
    pub fn trace(&self, ray: &Ray, mode: TraceMode) -> Option<TriangleHit> {
        let (mesh, octree) = self.built();

        octree.trace(mesh, ray, mode)
    }

    pub fn ray_intersect_brute_force(
        &self,
        ray: &Ray,
    ) -> Option<Intersection<'_>> {
        let mesh = self.mesh.as_ref()?;

        self.trace_brute_force(ray, TraceMode::Nearest)
            .map(|hit| mesh.interpolate(hit))
    }

    pub fn ray_occluded_brute_force(&self, ray: &Ray) -> bool {
        self.trace_brute_force(ray, TraceMode::Any).is_some()
    }

    pub fn trace_brute_force(
        &self,
        ray: &Ray,
        mode: TraceMode,
    ) -> Option<TriangleHit> {
        let mesh = self.mesh.as_ref()?;
        let mut ray = *ray;
        let mut hit = None;

        for triangle in 0..mesh.triangle_count() as u32 {
            let Some(candidate) = mesh.ray_intersect(triangle, &ray) else {
                continue;
            };

            if mode == TraceMode::Any {
                return Some(candidate);
            }

            ray.maxt = candidate.t;
            hit = Some(candidate);
        }

        hit
    }

    fn built(&self) -> (&Mesh, &Octree) {
        match (&self.mesh, &self.octree) {
            (Some(mesh), Some(octree)) => (mesh, octree),
            _ => panic!("Accel::build() must be called before querying"),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;
    use crate::MeshTriangle;

    fn triangle() -> Mesh {
        Mesh::from_triangles([MeshTriangle::default().with_positions([
            vec3(-1.0, -1.0, 0.0),
            vec3(1.0, -1.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        ])])
        .unwrap()
    }

    #[test]
    fn add_mesh() {
        let mut target = Accel::new();

        assert_eq!(0, target.triangle_count());
        assert!(!target.bounding_box().is_set());

        target.add_mesh(triangle()).unwrap();

        assert_eq!(1, target.triangle_count());
        assert_eq!(triangle().bounds(), target.bounding_box());

        assert_eq!(Err(Error::MultipleMeshes), target.add_mesh(triangle()));
        assert_eq!(1, target.triangle_count());
    }

    #[test]
    fn build_without_mesh() {
        let mut target = Accel::new();

        assert_eq!(Err(Error::MissingMesh), target.build().map(|_| ()));
        assert!(target.octree().is_none());
    }

    #[test]
    fn build() {
        let mut target = Accel::with_config(
            OctreeConfig::default().with_max_leaf_size(4),
        );

        target.add_mesh(triangle()).unwrap();

        let stats = *target.build().unwrap();

        assert_eq!(1, stats.leaves);
        assert_eq!(0, stats.interiors);
        assert_eq!(4, target.config().max_leaf_size);
        assert!(target.octree().is_some());
    }

    #[test]
    #[should_panic(expected = "must be called before querying")]
    fn query_before_build() {
        let mut target = Accel::new();

        target.add_mesh(triangle()).unwrap();
        target.ray_intersect(&Ray::new(vec3(0.0, 0.0, -1.0), Vec3::Z));
    }

    #[test]
    fn queries() {
        let mut target = Accel::new();

        target.add_mesh(triangle()).unwrap();
        target.build().unwrap();

        let ray = Ray::new(vec3(0.0, 0.0, -2.0), Vec3::Z);
        let hit = target.ray_intersect(&ray).unwrap();

        assert_eq!(0, hit.triangle);
        assert!((hit.t - 2.0).abs() < 1e-5);
        assert!(hit.p.abs_diff_eq(Vec3::ZERO, 1e-5));

        assert!(target.ray_occluded(&ray));
        assert!(!target.ray_occluded(&ray.with_maxt(1.0)));

        let ray = Ray::new(vec3(2.0, 0.0, -2.0), Vec3::Z);

        assert!(target.ray_intersect(&ray).is_none());
        assert!(!target.ray_occluded(&ray));
    }

    #[test]
    fn brute_force_without_build() {
        let mut target = Accel::new();
        let ray = Ray::new(vec3(0.0, 0.0, -2.0), Vec3::Z);

        assert!(target.trace_brute_force(&ray, TraceMode::Nearest).is_none());

        target.add_mesh(triangle()).unwrap();

        let hit = target.ray_intersect_brute_force(&ray).unwrap();

        assert_eq!(0, hit.triangle);
        assert!(target.ray_occluded_brute_force(&ray));
    }
}
