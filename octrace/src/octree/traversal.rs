use octrace_math::Ray;

use super::{OctreeNodeId, OctreeNodes};
use crate::{Mesh, TriangleHit};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TraceMode {
    /// Find the closest hit along the ray
    #[default]
    Nearest,

    /// Stop at the first hit found, no matter how far it is; used for
    /// shadow rays
    Any,
}

/// Finds the triangles hit by `ray`, walking only the leaves whose boxes the
/// ray passes through.
///
/// Leaves are visited in the order the ray enters them and the search stops
/// at the first leaf entered past the best hit so far. Since a triangle can
/// be referenced by more than one leaf, it may get tested repeatedly; that's
/// harmless because a hit is only accepted when it's strictly closer than the
/// current one.
pub fn trace(
    nodes: &OctreeNodes,
    mesh: &Mesh,
    ray: &Ray,
    mode: TraceMode,
) -> Option<TriangleHit> {
    let mut ray = *ray;
    let leaves = collect_leaves(nodes, &ray);
    let mut hit = None;

    for (entry, leaf) in leaves {
        if entry > ray.maxt {
            break;
        }

        for &triangle in nodes[leaf].triangles() {
            let Some(candidate) = mesh.ray_intersect(triangle, &ray) else {
                continue;
            };

            if mode == TraceMode::Any {
                return Some(candidate);
            }

            ray.maxt = candidate.t;
            hit = Some(candidate);
        }
    }

    hit
}

/// Returns non-empty leaves pierced by the ray, together with the distance
/// at which the ray enters each of them, ordered by that distance.
fn collect_leaves(nodes: &OctreeNodes, ray: &Ray) -> Vec<(f32, OctreeNodeId)> {
    let mut leaves = Vec::new();

    let Some((entry, _)) = nodes.root().bounds.ray_interval(ray) else {
        return leaves;
    };

    let mut stack = vec![(entry, OctreeNodeId::root())];

    while let Some((entry, id)) = stack.pop() {
        let node = &nodes[id];

        if node.is_leaf() {
            if !node.triangles().is_empty() {
                leaves.push((entry, id));
            }

            continue;
        }

        for child in node.children() {
            if let Some((entry, _)) = nodes[child].bounds.ray_interval(ray) {
                stack.push((entry, child));
            }
        }
    }

    leaves.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    leaves
}
