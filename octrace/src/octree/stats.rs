/// Diagnostic counters gathered while building an octree; nothing relies on
/// them for correctness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
    pub leaves: usize,
    pub interiors: usize,

    /// Octants skipped because no triangle overlapped them
    pub empty_octants: usize,

    /// Sum of all leaves' triangle counts; exceeds the mesh's triangle count
    /// when triangles got replicated across octants
    pub triangle_refs: usize,

    pub largest_leaf: usize,
    pub deepest_leaf: u32,
}

impl OctreeStats {
    pub(super) fn record_leaf(&mut self, depth: u32, triangles: usize) {
        self.leaves += 1;
        self.triangle_refs += triangles;
        self.largest_leaf = self.largest_leaf.max(triangles);
        self.deepest_leaf = self.deepest_leaf.max(depth);
    }

    pub fn nodes(&self) -> usize {
        self.leaves + self.interiors
    }
}
