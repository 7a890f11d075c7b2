use octrace_math::BoundingBox;

#[derive(Clone, Debug, PartialEq)]
pub struct OctreeNode {
    pub bounds: BoundingBox,
    pub depth: u32,

    /// Which octant of the parent this node occupies (zero for the root)
    pub slot: u8,

    /// Only used while building, to splice demoted nodes into their parent
    pub parent: Option<OctreeNodeId>,

    pub kind: OctreeNodeKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum OctreeNodeKind {
    Interior {
        children: [Option<OctreeNodeId>; 8],

        /// Triangles still to be distributed among the children; always
        /// empty once the builder is done with this node.
        pending: Vec<u32>,
    },

    Leaf {
        triangles: Vec<u32>,
    },
}

impl OctreeNode {
    pub fn leaf(
        bounds: BoundingBox,
        depth: u32,
        slot: u8,
        parent: Option<OctreeNodeId>,
        triangles: Vec<u32>,
    ) -> Self {
        Self {
            bounds,
            depth,
            slot,
            parent,
            kind: OctreeNodeKind::Leaf { triangles },
        }
    }

    pub fn interior(
        bounds: BoundingBox,
        depth: u32,
        slot: u8,
        parent: Option<OctreeNodeId>,
        pending: Vec<u32>,
    ) -> Self {
        Self {
            bounds,
            depth,
            slot,
            parent,
            kind: OctreeNodeKind::Interior {
                children: [None; 8],
                pending,
            },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, OctreeNodeKind::Leaf { .. })
    }

    /// Returns the triangles of a leaf; interior nodes own none.
    pub fn triangles(&self) -> &[u32] {
        match &self.kind {
            OctreeNodeKind::Leaf { triangles } => triangles,
            OctreeNodeKind::Interior { .. } => &[],
        }
    }

    pub fn children(&self) -> impl Iterator<Item = OctreeNodeId> + '_ {
        let children: &[Option<OctreeNodeId>] = match &self.kind {
            OctreeNodeKind::Interior { children, .. } => &children[..],
            OctreeNodeKind::Leaf { .. } => &[],
        };

        children.iter().flatten().copied()
    }
}

impl Default for OctreeNode {
    fn default() -> Self {
        Self::leaf(Default::default(), 0, 0, None, Vec::new())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OctreeNodeId(u32);

impl OctreeNodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn root() -> Self {
        Self::new(0)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}
