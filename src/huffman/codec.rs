use crate::bits::{BitSink, BitSource};
use crate::error::{HuffmanError, Result};
use crate::huffman::tree::{HuffmanTree, NUM_SYMBOLS};

impl HuffmanTree {
    /// Write the code of `symbol` to `sink`.
    ///
    /// A tree with a single symbol has no edges; each occurrence is then written as one
    /// `0` bit.
    pub fn encode<S: BitSink + ?Sized>(&self, symbol: u8, sink: &mut S) -> Result<()> {
        let mut path = [0u8; NUM_SYMBOLS];
        let start = self.code_path(symbol, &mut path)?;
        for &bit in path[start..].iter() {
            sink.write_bit(bit)?;
        }
        Ok(())
    }

    /// Read one symbol from `source` by walking from the root to a leaf.
    pub fn decode<S: BitSource + ?Sized>(&self, source: &mut S) -> Result<u8> {
        let mut node = self.root.ok_or(HuffmanError::EmptyInput)?;

        if self.node(node).is_leaf() {
            // Single symbol tree: skip the placeholder bit.
            source.read_bit()?;
        }
        while let Some((left, right)) = self.node(node).children() {
            node = if source.read_bit()? == 0 { left } else { right };
        }
        self.node(node)
            .symbol
            .ok_or(HuffmanError::CorruptTree("leaf without a symbol"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{BitReader, BitWriter, DevBitStream};
    use crate::huffman::tree::tests::{freqs_from, random_freqs};
    use rand::{rngs, Rng, SeedableRng};
    use std::io;

    #[test]
    fn test_encode_bits() -> Result<()> {
        let tree = HuffmanTree::build(&freqs_from(&[
            (b'a', 5),
            (b'b', 9),
            (b'c', 12),
            (b'd', 13),
            (b'e', 16),
            (b'f', 45),
        ]));
        let mut stream = DevBitStream::for_writing();
        for &symbol in b"fab" {
            tree.encode(symbol, &mut stream)?;
        }
        assert_eq!(stream.bits(), &[0, 1, 1, 0, 0, 1, 1, 0, 1]);

        let mut stream = DevBitStream::for_reading(stream.remove_data());
        assert_eq!(tree.decode(&mut stream)?, b'f');
        assert_eq!(tree.decode(&mut stream)?, b'a');
        assert_eq!(tree.decode(&mut stream)?, b'b');
        assert!(stream.is_at_end()?);
        Ok(())
    }

    #[test]
    fn test_every_symbol_decodes() -> Result<()> {
        for seed in 0..20 {
            let tree = HuffmanTree::build(&random_freqs(seed));
            for symbol in tree.symbols() {
                let mut stream = DevBitStream::for_writing();
                tree.encode(symbol, &mut stream)?;
                let mut stream = DevBitStream::for_reading(stream.remove_data());
                assert_eq!(tree.decode(&mut stream)?, symbol);
                assert!(stream.is_at_end()?);
            }
        }
        Ok(())
    }

    #[test]
    fn test_single_symbol() -> Result<()> {
        let tree = HuffmanTree::build(&freqs_from(&[(b'z', 3)]));
        let mut stream = DevBitStream::for_writing();
        for _ in 0..3 {
            tree.encode(b'z', &mut stream)?;
        }
        assert_eq!(stream.bits(), &[0, 0, 0]);

        let mut stream = DevBitStream::for_reading(stream.remove_data());
        for _ in 0..3 {
            assert_eq!(tree.decode(&mut stream)?, b'z');
        }
        assert!(matches!(
            tree.decode(&mut stream),
            Err(HuffmanError::TruncatedStream)
        ));
        Ok(())
    }

    #[test]
    fn test_errors() {
        let empty = HuffmanTree::build(&[0; NUM_SYMBOLS]);
        let mut stream = DevBitStream::for_writing();
        assert!(matches!(
            empty.encode(1, &mut stream),
            Err(HuffmanError::EmptyInput)
        ));
        assert!(matches!(
            empty.decode(&mut stream),
            Err(HuffmanError::EmptyInput)
        ));

        let tree = HuffmanTree::build(&freqs_from(&[(1, 1), (2, 1), (3, 2)]));
        assert!(matches!(
            tree.encode(4, &mut stream),
            Err(HuffmanError::UnknownSymbol(4))
        ));
        assert_eq!(stream.len(), 0);

        // Runs out of bits in the middle of a code.
        let mut stream = DevBitStream::for_reading(vec![1]);
        assert!(matches!(
            tree.decode(&mut stream),
            Err(HuffmanError::TruncatedStream)
        ));
    }

    #[test]
    fn test_encode_decode_bytes() -> Result<()> {
        let mut rng = rngs::SmallRng::seed_from_u64(11);
        let input: Vec<u8> = (0..20_000)
            .map(|_| (rng.gen_range(0..64u32) * rng.gen_range(0..4u32)) as u8)
            .collect();
        let mut freqs = [0; NUM_SYMBOLS];
        for &byte in input.iter() {
            freqs[byte as usize] += 1;
        }
        let tree = HuffmanTree::build(&freqs);

        let mut encoded = io::Cursor::new(Vec::new());
        let mut writer = BitWriter::new(&mut encoded);
        for &byte in input.iter() {
            tree.encode(byte, &mut writer)?;
        }
        writer.finish()?;

        let encoded = encoded.into_inner();
        let size = encoded.len() as u64;
        let mut cursor = io::Cursor::new(encoded);
        let mut reader = BitReader::new(&mut cursor, size);
        for &byte in input.iter() {
            assert_eq!(tree.decode(&mut reader)?, byte);
        }
        Ok(())
    }
}
