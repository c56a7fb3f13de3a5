use std::fmt;
use std::fmt::Debug;
use std::io;

use crate::base::DebugLog;
use crate::bits::bit_ops::*;
use crate::bits::BitSource;
use crate::error::{HuffmanError, Result};

// If true, log buffer refills.
const DEBUG: bool = false;

// Debug log.
const LOG: DebugLog = DebugLog::new("BitReader");

// Buffer size.
const BUF_SIZE: usize = 8 * 1024;

/// Read a bit stream from a byte source.
///
/// Bits are kept msb-aligned in a 64-bit register which is refilled one byte at a time
/// from an internal buffer. Reading past the end of the source is an error rather than
/// returning padding.
pub struct BitReader<'a> {
    // The current data buffer. Stores the next bits aligned to msb.
    data: u64,

    // Number of bits available in `data`.
    bits_avail: u32,

    // Internal buffer.
    buf: Box<[u8; BUF_SIZE]>,

    // Position in the buffer.
    buf_pos: usize,

    // End of the buffer.
    buf_end: usize,

    // Reader.
    reader: &'a mut dyn io::Read,

    // Size of the source in bytes.
    size: u64,

    // Number of bytes pulled from `reader`.
    bytes_read: u64,

    // Set once `reader` reports end of stream.
    eof: bool,
}

impl<'a> BitReader<'a> {
    /// Create a new instance over a source of `size` bytes.
    pub fn new(reader: &'a mut dyn io::Read, size: u64) -> BitReader<'a> {
        BitReader {
            data: 0,
            bits_avail: 0,
            buf: Box::new([0; BUF_SIZE]),
            buf_pos: 0,
            buf_end: 0,
            reader,
            size,
            bytes_read: 0,
            eof: false,
        }
    }

    /// Number of bits consumed so far.
    pub fn bits_consumed(&self) -> u64 {
        let buffered = (self.buf_end - self.buf_pos) as u64;
        (self.bytes_read - buffered) * 8 - self.bits_avail as u64
    }

    /// Finish the reader and return number of bytes consumed, counting a partially read
    /// byte as consumed.
    pub fn finish(&mut self) -> u64 {
        LOG.print("Finish");
        self.bits_consumed().div_ceil(8)
    }

    // Fill the data register with as many whole bytes as fit.
    fn fill_data(&mut self) -> Result<()> {
        while self.bits_avail <= 56 {
            if self.buf_pos == self.buf_end && !self.fill_buf()? {
                break;
            }
            let byte = self.buf[self.buf_pos] as u64;
            self.buf_pos += 1;
            self.data |= shift_left(byte, 56 - self.bits_avail);
            self.bits_avail += 8;
        }
        Ok(())
    }

    // Fill the buffer with more data. Returns false at end of stream.
    fn fill_buf(&mut self) -> Result<bool> {
        if self.eof {
            return Ok(false);
        }
        let size = loop {
            match self.reader.read(&mut self.buf[..]) {
                Ok(size) => break size,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HuffmanError::Io(e)),
            }
        };
        if DEBUG {
            LOG.print(&format!("Read {} bytes", size));
        }
        self.buf_pos = 0;
        self.buf_end = size;
        self.bytes_read += size as u64;
        if size == 0 {
            LOG.print("End of input stream");
            self.eof = true;
        }
        Ok(size > 0)
    }
}

impl BitSource for BitReader<'_> {
    fn read_bits(&mut self, bits: u32) -> Result<u64> {
        debug_assert!(bits <= 56);
        if bits == 0 {
            return Ok(0);
        }
        if self.bits_avail < bits {
            self.fill_data()?;
            if self.bits_avail < bits {
                return Err(HuffmanError::TruncatedStream);
            }
        }
        let result = shift_right(self.data, 64 - bits);
        self.data = shift_left(self.data, bits);
        self.bits_avail -= bits;
        Ok(result)
    }

    fn is_at_end(&mut self) -> Result<bool> {
        if self.bits_avail == 0 {
            self.fill_data()?;
        }
        Ok(self.bits_avail == 0)
    }

    fn size_in_bytes(&self) -> u64 {
        self.size
    }
}

impl Debug for BitReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitReader")
            .field("data", &format!("{:#x}", &self.data))
            .field("bits_avail", &self.bits_avail)
            .field("buffered bytes", &(self.buf_end - self.buf_pos))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cursor(buffer: &[u8]) -> (Cursor<Vec<u8>>, u64) {
        (Cursor::new(buffer.to_vec()), buffer.len() as u64)
    }

    #[test]
    // Can read 0 bits.
    fn test_0_bits() -> Result<()> {
        let (mut reader, size) = cursor(&[1, 2, 3]);
        let mut bit_reader = BitReader::new(&mut reader, size);
        assert_eq!(bit_reader.read_bits(0)?, 0);
        assert_eq!(bit_reader.finish(), 0);
        assert_eq!(bit_reader.size_in_bytes(), 3);
        Ok(())
    }

    #[test]
    // Read bits.
    fn test_read_bits() -> Result<()> {
        let (mut reader, size) = cursor(&[1, 2, 3, 0xff, 0x81, 0x53, 0x78, 0x12, 0x25, 0xab]);
        let mut bit_reader = BitReader::new(&mut reader, size);

        assert_eq!(bit_reader.read_bits(8)?, 1);
        assert_eq!(bit_reader.read_bits(8)?, 2);
        assert_eq!(bit_reader.read_bits(8)?, 3);
        assert_eq!(bit_reader.read_u32()?, 0xff815378);
        assert_eq!(bit_reader.read_bits(4)?, 0x1);
        assert_eq!(bit_reader.bits_consumed(), 60);
        assert_eq!(bit_reader.read_bits(12)?, 0x225);
        assert_eq!(bit_reader.read_bits(8)?, 0xab);
        assert!(bit_reader.is_at_end()?);
        assert_eq!(bit_reader.finish(), 10);
        Ok(())
    }

    #[test]
    fn test_read_single_bits() -> Result<()> {
        let (mut reader, size) = cursor(&[0b1010_0110]);
        let mut bit_reader = BitReader::new(&mut reader, size);

        let bits: Vec<u8> = (0..8)
            .map(|_| bit_reader.read_bit())
            .collect::<Result<_>>()?;
        assert_eq!(bits, vec![1, 0, 1, 0, 0, 1, 1, 0]);
        Ok(())
    }

    #[test]
    // Reading past end of stream is an error.
    fn test_end_of_stream() -> Result<()> {
        let (mut reader, size) = cursor(&[1, 2, 3, 4]);
        let mut bit_reader = BitReader::new(&mut reader, size);

        assert_eq!(bit_reader.read_bits(28)?, 0x0102030);
        assert!(!bit_reader.is_at_end()?);
        assert!(matches!(
            bit_reader.read_bits(8),
            Err(HuffmanError::TruncatedStream)
        ));
        assert_eq!(bit_reader.read_bits(4)?, 4);
        assert!(bit_reader.is_at_end()?);
        assert!(matches!(
            bit_reader.read_bit(),
            Err(HuffmanError::TruncatedStream)
        ));
        Ok(())
    }

    #[test]
    // Data larger than the internal buffer is read across refills.
    fn test_refill() -> Result<()> {
        let buffer: Vec<u8> = (0..BUF_SIZE * 3 + 5).map(|i| i as u8).collect();
        let (mut reader, size) = cursor(&buffer);
        let mut bit_reader = BitReader::new(&mut reader, size);

        for &byte in buffer.iter() {
            assert_eq!(bit_reader.read_bits(8)?, byte as u64);
        }
        assert!(bit_reader.is_at_end()?);
        assert_eq!(bit_reader.finish(), buffer.len() as u64);
        Ok(())
    }
}
