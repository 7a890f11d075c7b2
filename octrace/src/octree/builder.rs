use std::mem;

use octrace_math::BoundingBox;

use super::{OctreeNode, OctreeNodeId, OctreeNodeKind, OctreeNodes, OctreeStats};
use crate::OctreeConfig;

/// Partitions `triangles` into an octree spanning `bounds`.
///
/// Triangles are assigned to every octant their bounding box overlaps, so a
/// triangle straddling a split plane ends up in more than one leaf.
pub fn run(
    bounds: BoundingBox,
    triangles: Vec<u32>,
    triangle_bounds: &[BoundingBox],
    config: OctreeConfig,
) -> (OctreeNodes, OctreeStats) {
    let max_leaf_size = config.max_leaf_size.max(1);

    let mut nodes = OctreeNodes::default();
    let mut stats = OctreeStats::default();

    if triangles.len() < max_leaf_size {
        stats.record_leaf(0, triangles.len());
        nodes.add(OctreeNode::leaf(bounds, 0, 0, None, triangles));

        return (nodes, stats);
    }

    let root = nodes.add(OctreeNode::interior(bounds, 0, 0, None, triangles));
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let node = &nodes[id];

        let OctreeNodeKind::Interior { pending, .. } = &node.kind else {
            unreachable!("only interior nodes are pushed onto the stack");
        };

        if pending.len() < max_leaf_size || node.depth >= config.max_depth {
            demote(&mut nodes, &mut stats, id);
        } else {
            split(&mut nodes, &mut stats, triangle_bounds, id, &mut stack);
        }
    }

    (nodes, stats)
}

/// Replaces an interior node with a leaf owning its pending triangles.
fn demote(nodes: &mut OctreeNodes, stats: &mut OctreeStats, id: OctreeNodeId) {
    let node = nodes.remove(id);

    let OctreeNodeKind::Interior { mut pending, .. } = node.kind else {
        unreachable!();
    };

    pending.shrink_to_fit();
    stats.record_leaf(node.depth, pending.len());

    let leaf_id = nodes.add(OctreeNode::leaf(
        node.bounds,
        node.depth,
        node.slot,
        node.parent,
        pending,
    ));

    if let Some(parent) = node.parent {
        nodes.set_child(parent, node.slot, leaf_id);
    }
}

fn split(
    nodes: &mut OctreeNodes,
    stats: &mut OctreeStats,
    triangle_bounds: &[BoundingBox],
    id: OctreeNodeId,
    stack: &mut Vec<OctreeNodeId>,
) {
    let node = &mut nodes[id];
    let bounds = node.bounds;
    let depth = node.depth;

    let OctreeNodeKind::Interior { pending, .. } = &mut node.kind else {
        unreachable!();
    };

    let pending = mem::take(pending);
    let octants = bounds.octants();
    let mut octant_triangles: [Vec<u32>; 8] = Default::default();

    for triangle in pending {
        let triangle_bb = triangle_bounds[triangle as usize];
        let mut assigned = false;

        for (octant, octant_triangles) in
            octants.iter().zip(octant_triangles.iter_mut())
        {
            if triangle_bb.overlaps(octant) {
                octant_triangles.push(triangle);
                assigned = true;
            }
        }

        // Octants tile their parent, so this only happens for unset bounds or
        // ones containing NaNs; such triangles are kept in the first octant
        if !assigned {
            octant_triangles[0].push(triangle);
        }
    }

    stats.interiors += 1;

    for (slot, (octant, triangles)) in
        octants.into_iter().zip(octant_triangles).enumerate()
    {
        if triangles.is_empty() {
            stats.empty_octants += 1;
            continue;
        }

        let slot = slot as u8;

        let child = nodes.add(OctreeNode::interior(
            octant,
            depth + 1,
            slot,
            Some(id),
            triangles,
        ));

        nodes.set_child(id, slot, child);
        stack.push(child);
    }
}
