/// Index of a node in a tree's node arena.
pub type NodeId = u16;

/// Type of the weights (symbol counts) in the tree.
pub type WeightType = u64;

/// A node of a Huffman tree.
///
/// A node is a leaf iff it has no children; internal nodes always have both.
/// `parent` is only a back link for walking from a leaf to the root. Nodes are owned
/// by the tree's arena, never through these links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    // Total weight of the subtree. Zero for trees read back from a stream.
    pub weight: WeightType,

    // Only leaves carry a symbol.
    pub symbol: Option<u8>,

    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn leaf(symbol: u8, weight: WeightType) -> Self {
        Self {
            weight,
            symbol: Some(symbol),
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn internal(left: NodeId, right: NodeId, weight: WeightType) -> Self {
        Self {
            weight,
            symbol: None,
            left: Some(left),
            right: Some(right),
            parent: None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The (left, right) children of an internal node.
    #[inline]
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match (self.left, self.right) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }
}
