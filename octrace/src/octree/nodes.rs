use std::{mem, ops};

use super::{OctreeNode, OctreeNodeId, OctreeNodeKind};

/// Arena owning every node of an octree.
#[derive(Clone, Debug, Default)]
pub struct OctreeNodes {
    nodes: Vec<OctreeNode>,
    free_nodes: Vec<OctreeNodeId>,
}

impl OctreeNodes {
    pub fn add(&mut self, node: OctreeNode) -> OctreeNodeId {
        if let Some(id) = self.free_nodes.pop() {
            self[id] = node;
            id
        } else {
            self.nodes.push(node);

            OctreeNodeId::new((self.nodes.len() - 1) as u32)
        }
    }

    /// Takes the node out of the arena; its id gets reused by the next
    /// [`Self::add()`].
    pub fn remove(&mut self, id: OctreeNodeId) -> OctreeNode {
        self.free_nodes.push(id);

        mem::take(&mut self[id])
    }

    /// Points `parent`'s child slot at `child`.
    pub fn set_child(
        &mut self,
        parent: OctreeNodeId,
        slot: u8,
        child: OctreeNodeId,
    ) {
        match &mut self[parent].kind {
            OctreeNodeKind::Interior { children, .. } => {
                children[slot as usize] = Some(child);
            }

            OctreeNodeKind::Leaf { .. } => {
                unreachable!("leaf {parent:?} cannot have children");
            }
        }
    }

    pub fn root(&self) -> &OctreeNode {
        &self[OctreeNodeId::root()]
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_nodes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OctreeNodeId, &OctreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (OctreeNodeId::new(id as u32), node))
            .filter(|(id, _)| !self.free_nodes.contains(id))
    }
}

impl ops::Index<OctreeNodeId> for OctreeNodes {
    type Output = OctreeNode;

    fn index(&self, index: OctreeNodeId) -> &Self::Output {
        &self.nodes[index.get() as usize]
    }
}

impl ops::IndexMut<OctreeNodeId> for OctreeNodes {
    fn index_mut(&mut self, index: OctreeNodeId) -> &mut Self::Output {
        &mut self.nodes[index.get() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_removed_ids() {
        let mut target = OctreeNodes::default();

        let a = target.add(OctreeNode::default());
        let b = target.add(OctreeNode::default());

        assert_eq!(OctreeNodeId::root(), a);
        assert_eq!(OctreeNodeId::new(1), b);
        assert_eq!(2, target.len());

        target.remove(b);

        assert_eq!(1, target.len());
        assert_eq!(1, target.iter().count());

        let c = target.add(OctreeNode::leaf(
            Default::default(),
            3,
            5,
            Some(a),
            vec![7],
        ));

        assert_eq!(b, c);
        assert_eq!(2, target.len());
        assert_eq!(&[7u32], target[c].triangles());
    }

    #[test]
    fn set_child() {
        let mut target = OctreeNodes::default();

        let root = target.add(OctreeNode::interior(
            Default::default(),
            0,
            0,
            None,
            Vec::new(),
        ));

        let child = target.add(OctreeNode::default());

        target.set_child(root, 6, child);

        assert_eq!(vec![child], target.root().children().collect::<Vec<_>>());
    }
}
