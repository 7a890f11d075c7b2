mod builder;
mod node;
mod nodes;
mod stats;
mod traversal;

use std::hash::{Hash, Hasher};
use std::time::Duration;

use fxhash::FxHasher;
use octrace_math::{BoundingBox, Ray};

pub use self::node::*;
pub use self::nodes::*;
pub use self::stats::*;
pub use self::traversal::*;
use crate::metrics::measure;
use crate::{Mesh, OctreeConfig, TriangleHit};

/// Spatial subdivision of a mesh's triangles into nested axis-aligned boxes.
///
/// Every node is either a leaf holding triangle ids or an interior node with
/// up to eight children, one per occupied octant; octants no triangle
/// overlaps are left out.
#[derive(Clone, Debug)]
pub struct Octree {
    nodes: OctreeNodes,
    stats: OctreeStats,
    build_time: Duration,
}

impl Octree {
    /// Builds an octree over all triangles of `mesh`, with the root spanning
    /// the mesh's bounding box.
    pub fn from_mesh(mesh: &Mesh, config: OctreeConfig) -> Self {
        let triangle_bounds: Vec<_> = (0..mesh.triangle_count())
            .map(|triangle| mesh.triangle_bounds(triangle))
            .collect();

        Self::build(
            mesh.bounds(),
            (0..mesh.triangle_count() as u32).collect(),
            &triangle_bounds,
            config,
        )
    }

    /// Builds an octree spanning `bounds` over `triangles`, which index
    /// `triangle_bounds`.
    pub fn build(
        bounds: BoundingBox,
        triangles: Vec<u32>,
        triangle_bounds: &[BoundingBox],
        config: OctreeConfig,
    ) -> Self {
        let ((nodes, stats), build_time) = measure(|| {
            builder::run(bounds, triangles, triangle_bounds, config)
        });

        Self {
            nodes,
            stats,
            build_time,
        }
    }

    pub fn root(&self) -> &OctreeNode {
        self.nodes.root()
    }

    pub fn nodes(&self) -> &OctreeNodes {
        &self.nodes
    }

    pub fn stats(&self) -> &OctreeStats {
        &self.stats
    }

    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    pub fn bounds(&self) -> BoundingBox {
        self.root().bounds
    }

    pub fn leaves(&self) -> impl Iterator<Item = &OctreeNode> {
        self.nodes
            .iter()
            .map(|(_, node)| node)
            .filter(|node| node.is_leaf())
    }

    pub fn trace(
        &self,
        mesh: &Mesh,
        ray: &Ray,
        mode: TraceMode,
    ) -> Option<TriangleHit> {
        traversal::trace(&self.nodes, mesh, ray, mode)
    }

    /// Returns a hash of the tree's shape and contents, stable across
    /// rebuilds of the same input; handy to tell whether two builds produced
    /// the same tree.
    ///
    /// Nodes are hashed depth-first in octant order, so the value doesn't
    /// depend on where the nodes ended up in the arena.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        let mut stack = vec![OctreeNodeId::root()];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];

            node.depth.hash(&mut hasher);
            node.slot.hash(&mut hasher);

            for value in [node.bounds.min(), node.bounds.max()] {
                value.to_array().map(f32::to_bits).hash(&mut hasher);
            }

            match &node.kind {
                OctreeNodeKind::Leaf { triangles } => {
                    true.hash(&mut hasher);
                    triangles.hash(&mut hasher);
                }

                OctreeNodeKind::Interior { children, .. } => {
                    false.hash(&mut hasher);

                    for child in children.iter().rev() {
                        child.is_some().hash(&mut hasher);
                        stack.extend(*child);
                    }
                }
            }
        }

        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    fn mesh() -> Mesh {
        let positions = (0..32)
            .flat_map(|i| {
                let offset = vec3(
                    (i % 4) as f32,
                    ((i / 4) % 4) as f32,
                    (i / 16) as f32,
                );

                [
                    offset,
                    offset + vec3(0.5, 0.0, 0.0),
                    offset + vec3(0.0, 0.5, 0.25),
                ]
            })
            .collect();

        let indices = (0..32).map(|i| [3 * i, 3 * i + 1, 3 * i + 2]).collect();

        Mesh::new(positions, indices).unwrap()
    }

    #[test]
    fn from_mesh() {
        let mesh = mesh();
        let config = OctreeConfig::default().with_max_leaf_size(4);
        let target = Octree::from_mesh(&mesh, config);

        assert_eq!(mesh.bounds(), target.bounds());
        assert!(!target.root().is_leaf());
        assert_eq!(target.stats().leaves, target.leaves().count());
        assert_eq!(target.stats().nodes(), target.nodes().len());
    }

    #[test]
    fn fingerprint() {
        let mesh = mesh();
        let config = OctreeConfig::default().with_max_leaf_size(4);

        let a = Octree::from_mesh(&mesh, config);
        let b = Octree::from_mesh(&mesh, config);

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.stats(), b.stats());

        let c = Octree::from_mesh(&mesh, config.with_max_leaf_size(8));

        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
