use derivative::Derivative;

/// Subdivision thresholds of the octree builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Derivative)]
#[derivative(Default)]
pub struct OctreeConfig {
    /// Nodes holding fewer triangles than this become leaves.
    #[derivative(Default(value = "20"))]
    pub max_leaf_size: usize,

    /// Nodes at this depth become leaves regardless of their triangle count;
    /// the root sits at depth zero.
    #[derivative(Default(value = "8"))]
    pub max_depth: u32,
}

impl OctreeConfig {
    pub fn with_max_leaf_size(mut self, max_leaf_size: usize) -> Self {
        self.max_leaf_size = max_leaf_size;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}
