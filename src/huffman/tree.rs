use std::fmt;

use crate::base::DebugLog;
use crate::error::{HuffmanError, Result};
use crate::huffman::heap::NodeHeap;
use crate::huffman::node::{Node, NodeId, WeightType};

/// Number of distinct symbols (byte values).
pub const NUM_SYMBOLS: usize = 256;

// A tree over 256 symbols is never deeper than this.
pub(crate) const MAX_DEPTH: usize = NUM_SYMBOLS - 1;

// Debug log.
const LOG: DebugLog = DebugLog::new("HuffmanTree");

/// A Huffman coding tree over byte symbols.
///
/// Nodes live in an arena owned by the tree. `leaves[b]` is the leaf for byte `b`, or
/// `None` if `b` does not occur.
#[derive(Clone)]
pub struct HuffmanTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: Option<NodeId>,
    pub(crate) leaves: [Option<NodeId>; NUM_SYMBOLS],
}

impl Default for HuffmanTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HuffmanTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            leaves: [None; NUM_SYMBOLS],
        }
    }

    /// Builds the tree from the symbol frequencies with the greedy Huffman merge.
    ///
    /// The two lowest weight nodes are merged repeatedly; the first one removed becomes
    /// the left (0) child. Equal weights are ordered by creation: leaves in ascending byte
    /// order, then merged nodes in the order they were made.
    pub fn build(freqs: &[WeightType; NUM_SYMBOLS]) -> Self {
        let mut tree = Self::new();
        let mut heap = NodeHeap::with_capacity(NUM_SYMBOLS);

        for (symbol, &weight) in freqs.iter().enumerate() {
            if weight > 0 {
                let id = tree.add_leaf(symbol as u8, weight);
                heap.push(id, weight);
            }
        }

        loop {
            let Some(left) = heap.pop() else {
                break;
            };
            let Some(right) = heap.pop() else {
                tree.root = Some(left.node);
                break;
            };
            let weight = left.weight + right.weight;
            let parent = tree.add_internal(left.node, right.node, weight);
            heap.push(parent, weight);
        }

        LOG.print(&format!(
            "Built tree: {} symbols, {} nodes, weight {}",
            tree.num_symbols(),
            tree.nodes.len(),
            tree.root_weight()
        ));
        tree
    }

    /// Root node, or `None` for an empty tree.
    #[cfg(test)]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    /// Leaf of `symbol`, if it occurs in the tree.
    pub fn leaf(&self, symbol: u8) -> Option<NodeId> {
        self.leaves[symbol as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total weight of the tree, i.e. the number of symbols it was built from.
    pub fn root_weight(&self) -> WeightType {
        self.root.map_or(0, |root| self.node(root).weight)
    }

    /// Number of distinct symbols.
    pub fn num_symbols(&self) -> usize {
        self.leaves.iter().filter(|leaf| leaf.is_some()).count()
    }

    #[cfg(test)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Symbols present in the tree, in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = u8> + '_ {
        (0..NUM_SYMBOLS)
            .filter(|&s| self.leaves[s].is_some())
            .map(|s| s as u8)
    }

    /// The code of `symbol` as a sequence of 0/1 bits in root-to-leaf order.
    pub fn code(&self, symbol: u8) -> Result<Vec<u8>> {
        let mut path = [0u8; NUM_SYMBOLS];
        let start = self.code_path(symbol, &mut path)?;
        Ok(path[start..].to_vec())
    }

    /// Number of bits written for each symbol. Zero for absent symbols.
    pub fn code_lengths(&self) -> [u32; NUM_SYMBOLS] {
        let mut lengths = [0u32; NUM_SYMBOLS];
        let mut path = [0u8; NUM_SYMBOLS];
        for symbol in self.symbols() {
            if let Ok(start) = self.code_path(symbol, &mut path) {
                lengths[symbol as usize] = (NUM_SYMBOLS - start) as u32;
            }
        }
        lengths
    }

    /// Release every node in post-order (children before their parent) and leave the tree
    /// empty. Returns the number of nodes released.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        let mut stack: Vec<(NodeId, bool)> = Vec::with_capacity(MAX_DEPTH + 1);
        if let Some(root) = self.root {
            stack.push((root, false));
        }
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                released += 1;
                continue;
            }
            stack.push((id, true));
            if let Some((left, right)) = self.node(id).children() {
                stack.push((right, false));
                stack.push((left, false));
            }
        }
        LOG.print(&format!("Released {} nodes", released));

        self.nodes.clear();
        self.root = None;
        self.leaves = [None; NUM_SYMBOLS];
        released
    }

    // Write the code of `symbol` into the tail of `path`, walking from its leaf up to the
    // root. Returns the start index of the code. A root that is itself a leaf gets the
    // one bit code `0`.
    pub(crate) fn code_path(&self, symbol: u8, path: &mut [u8; NUM_SYMBOLS]) -> Result<usize> {
        let root = self.root.ok_or(HuffmanError::EmptyInput)?;
        let mut node = self.leaf(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?;
        let mut start = NUM_SYMBOLS;
        if node == root {
            start -= 1;
            path[start] = 0;
            return Ok(start);
        }
        while let Some(parent) = self.node(node).parent {
            start -= 1;
            path[start] = if self.node(parent).left == Some(node) {
                0
            } else {
                1
            };
            node = parent;
        }
        Ok(start)
    }

    pub(crate) fn add_leaf(&mut self, symbol: u8, weight: WeightType) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::leaf(symbol, weight));
        self.leaves[symbol as usize] = Some(id);
        id
    }

    pub(crate) fn add_internal(
        &mut self,
        left: NodeId,
        right: NodeId,
        weight: WeightType,
    ) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::internal(left, right, weight));
        self.nodes[left as usize].parent = Some(id);
        self.nodes[right as usize].parent = Some(id);
        id
    }
}

impl fmt::Debug for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes = f.debug_map();
        for symbol in self.symbols() {
            let code: String = self
                .code(symbol)
                .unwrap_or_default()
                .iter()
                .map(|&bit| if bit == 0 { '0' } else { '1' })
                .collect();
            codes.entry(&symbol, &code);
        }
        codes.finish()
    }
}
