use std::io;

use crate::base::DebugLog;
use crate::bits::{BitReader, BitSink, BitSource, BitWriter};
use crate::coding::decoder::{DecodeResult, Decoder};
use crate::coding::encoder::{EncodeResult, Encoder};
use crate::coding::input::InputSource;
use crate::coding::output::OutputSink;
use crate::error::{HuffmanError, Result};
use crate::huffman::{HuffmanTree, NUM_SYMBOLS};

// Size of the symbol count header.
const HEADER_BYTES: u64 = 4;

// Input and output buffer size.
const READ_BUFFER_SIZE: usize = 8 * 1024;

// Debug log.
const LOG: DebugLog = DebugLog::new("HuffmanCoding");

/// Compresses its input with a Huffman tree built from the input's byte frequencies.
///
/// Output layout: 32-bit symbol count, tree shape padded to a byte boundary, then the
/// code of every input byte.
#[derive(Default)]
pub struct HuffmanEncoder {
    tree: HuffmanTree,
}

impl HuffmanEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree used by the last `encode()`.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    fn encode_loop(
        tree: &HuffmanTree,
        reader: &mut dyn io::Read,
        writer: &mut dyn io::Write,
    ) -> Result<EncodeResult> {
        let mut bit_writer = BitWriter::new(writer);
        if tree.is_empty() {
            // Nothing to encode: a bare zero count.
            bit_writer.write_u32(0)?;
        } else {
            tree.serialize(&mut bit_writer)?;
        }

        // The header already promises this many symbols.
        let expected = tree.root_weight();
        let input_changed = |actual| HuffmanError::InputChanged { expected, actual };

        let mut input_buf: Box<[u8; READ_BUFFER_SIZE]> = Box::new([0; READ_BUFFER_SIZE]);
        let mut bytes_read: u64 = 0;
        loop {
            let len = match reader.read(input_buf.as_mut_slice()) {
                Ok(0) => break,
                Ok(len) => len,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            bytes_read += len as u64;
            if bytes_read > expected {
                return Err(input_changed(bytes_read));
            }
            for &symbol in input_buf[0..len].iter() {
                tree.encode(symbol, &mut bit_writer)?;
            }
        }
        if bytes_read != expected {
            return Err(input_changed(bytes_read));
        }

        let bytes_written = bit_writer.finish()? as u64;
        Ok(EncodeResult::new(bytes_read, bytes_written))
    }
}

impl Encoder for HuffmanEncoder {
    fn encode(&mut self, input: &mut InputSource, output: &mut OutputSink) -> Result<EncodeResult> {
        let frequencies = input.frequencies()?;
        self.tree.clear();
        self.tree = HuffmanTree::build(&frequencies);
        LOG.print(&format!("Codes: {:?}", self.tree));

        let lengths = self.tree.code_lengths();
        let payload_bits: u64 = (0..NUM_SYMBOLS)
            .map(|s| lengths[s] as u64 * frequencies[s])
            .sum();
        LOG.print(&format!(
            "Tree {} bits, payload {} bits",
            self.tree.shape_bits(),
            payload_bits
        ));

        let mut reader = input.reader()?;
        let mut writer = output.writer()?;
        Self::encode_loop(&self.tree, &mut reader, &mut writer)
    }
}

/// Restores the input of `HuffmanEncoder`.
#[derive(Default)]
pub struct HuffmanDecoder {
    tree: HuffmanTree,
}

impl HuffmanDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree read by the last `decode()`. Empty if nothing was decoded.
    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    fn decode_loop(
        &mut self,
        reader: &mut dyn io::Read,
        size: u64,
        writer: &mut dyn io::Write,
    ) -> Result<DecodeResult> {
        let mut bit_reader = BitReader::new(reader, size);
        self.tree.clear();

        // An empty file decodes to nothing.
        if bit_reader.is_at_end()? {
            return Ok(DecodeResult::new(0, 0));
        }
        let count = bit_reader.read_u32()?;
        // A zero count, or a header with nothing after it, decodes to nothing.
        if count == 0 || bit_reader.is_at_end()? {
            let bytes_read = bit_reader.finish();
            return Ok(DecodeResult::new(bytes_read, 0));
        }

        let shape_limit = bit_reader.size_in_bytes().saturating_sub(HEADER_BYTES) * 8;
        self.tree = HuffmanTree::deserialize(shape_limit, &mut bit_reader)?;

        let mut buffer: Box<[u8; READ_BUFFER_SIZE]> = Box::new([0; READ_BUFFER_SIZE]);
        let mut bytes_written: u64 = 0;
        let mut buffer_pos = 0;
        for _ in 0..count {
            buffer[buffer_pos] = self.tree.decode(&mut bit_reader)?;
            buffer_pos += 1;
            if buffer_pos == READ_BUFFER_SIZE {
                writer.write_all(&buffer[..])?;
                buffer_pos = 0;
                bytes_written += READ_BUFFER_SIZE as u64;
            }
        }
        let bytes_read = bit_reader.finish();
        writer.write_all(&buffer[0..buffer_pos])?;
        writer.flush()?;
        bytes_written += buffer_pos as u64;

        Ok(DecodeResult::new(bytes_read, bytes_written))
    }
}

impl Decoder for HuffmanDecoder {
    fn decode(&mut self, input: &mut InputSource, output: &mut OutputSink) -> Result<DecodeResult> {
        let size = input.len()?;
        let mut reader = input.reader()?;
        let mut writer = output.writer()?;
        self.decode_loop(&mut reader, size, &mut writer)
    }
}
