// Tree header format, all bits msb first:
//
//   [32-bit total symbol count]
//   [preorder shape: 1 + 8-bit symbol for a leaf, 0 + left + right for an internal node]
//   [0 bits up to the next byte boundary]

use crate::base::DebugLog;
use crate::bits::{BitSink, BitSource};
use crate::error::{HuffmanError, Result};
use crate::huffman::node::NodeId;
use crate::huffman::tree::{HuffmanTree, MAX_DEPTH};

const LEAF_TAG: u8 = 1;
const INTERNAL_TAG: u8 = 0;
const SYMBOL_BITS: u32 = 8;

// Debug log.
const LOG: DebugLog = DebugLog::new("TreeSerializer");

// Reads the shape region, refusing to go past its declared length.
struct ShapeReader<'a, S: BitSource + ?Sized> {
    source: &'a mut S,
    limit: u64,
    consumed: u64,
}

impl<S: BitSource + ?Sized> ShapeReader<'_, S> {
    fn read_bits(&mut self, bits: u32) -> Result<u64> {
        if self.consumed + bits as u64 > self.limit {
            return Err(HuffmanError::TruncatedStream);
        }
        let value = self.source.read_bits(bits)?;
        self.consumed += bits as u64;
        Ok(value)
    }
}

impl HuffmanTree {
    /// Number of bits in the shape encoding of this tree.
    pub fn shape_bits(&self) -> u64 {
        match self.num_symbols() {
            0 => 0,
            n => n as u64 * (1 + SYMBOL_BITS as u64) + (n as u64 - 1),
        }
    }

    /// Write the symbol count header and the tree shape, then flush `sink` so the
    /// payload starts on a byte boundary. Does nothing for an empty tree.
    ///
    /// Returns the number of shape bits written, excluding the header and padding.
    pub fn serialize<S: BitSink + ?Sized>(&self, sink: &mut S) -> Result<u64> {
        let Some(root) = self.root else {
            return Ok(0);
        };
        let total = self.root_weight();
        let header = u32::try_from(total).map_err(|_| HuffmanError::CountOverflow(total))?;
        sink.write_u32(header)?;

        let bits = self.write_node(root, sink)?;
        sink.flush()?;
        LOG.print(&format!(
            "Wrote tree: count {}, {} shape bits",
            header, bits
        ));
        Ok(bits)
    }

    fn write_node<S: BitSink + ?Sized>(&self, id: NodeId, sink: &mut S) -> Result<u64> {
        let node = self.node(id);
        if let Some((left, right)) = node.children() {
            sink.write_bit(INTERNAL_TAG)?;
            let left_bits = self.write_node(left, sink)?;
            let right_bits = self.write_node(right, sink)?;
            return Ok(1 + left_bits + right_bits);
        }
        let symbol = node
            .symbol
            .ok_or(HuffmanError::CorruptTree("leaf without a symbol"))?;
        sink.write_bit(LEAF_TAG)?;
        sink.write_bits(symbol as u64, SYMBOL_BITS)?;
        Ok(1 + SYMBOL_BITS as u64)
    }

    /// Rebuild a tree from its shape encoding. The count header must already have been
    /// read. At most `bit_length` bits are read for the shape; afterwards the padding up
    /// to the next byte boundary is skipped.
    ///
    /// Node weights are not stored in the stream and are left at zero.
    pub fn deserialize<S: BitSource + ?Sized>(bit_length: u64, source: &mut S) -> Result<Self> {
        let mut tree = Self::new();
        let mut reader = ShapeReader {
            source: &mut *source,
            limit: bit_length,
            consumed: 0,
        };
        let root = tree.read_node(&mut reader, 0)?;
        tree.root = Some(root);
        let consumed = reader.consumed;

        let padding = (8 - consumed % 8) % 8;
        source.read_bits(padding as u32)?;
        LOG.print(&format!(
            "Read tree: {} symbols, {} shape bits, {} padding bits",
            tree.num_symbols(),
            consumed,
            padding
        ));
        Ok(tree)
    }

    fn read_node<S: BitSource + ?Sized>(
        &mut self,
        reader: &mut ShapeReader<'_, S>,
        depth: usize,
    ) -> Result<NodeId> {
        if depth > MAX_DEPTH {
            return Err(HuffmanError::CorruptTree("tree is too deep"));
        }
        if reader.read_bits(1)? as u8 == LEAF_TAG {
            let symbol = reader.read_bits(SYMBOL_BITS)? as u8;
            if self.leaf(symbol).is_some() {
                return Err(HuffmanError::CorruptTree("duplicate symbol"));
            }
            return Ok(self.add_leaf(symbol, 0));
        }
        let left = self.read_node(reader, depth + 1)?;
        let right = self.read_node(reader, depth + 1)?;
        Ok(self.add_internal(left, right, 0))
    }
}
