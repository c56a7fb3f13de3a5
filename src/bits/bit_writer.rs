use std::io;

use crate::base::DebugLog;
use crate::bits::bit_ops::*;
use crate::bits::BitSink;
use crate::error::Result;

/// Number of bytes to buffer before writing out.
pub const BUF_SIZE: usize = 8 * 1024;

// If true, log every write.
const DEBUG: bool = false;

// Debug log.
const LOG: DebugLog = DebugLog::new("BitWriter");

/// A bit stream writer that writes to a Writer.
pub struct BitWriter<'a> {
    // The current data buffer. Written data is msb aligned.
    data: u64,

    // Number of bits that can be written to `data`.
    bits_avail: u32,

    // Buffer to store the bytes to be written out to `writer`.
    buf: Vec<u8>,

    // External writer.
    writer: &'a mut dyn io::Write,

    // Total number of bytes handed to `writer`.
    bytes_written: usize,
}

impl<'a> BitWriter<'a> {
    /// Create a new instance.
    pub fn new(writer: &'a mut dyn io::Write) -> Self {
        Self {
            data: 0,
            bits_avail: 64,
            buf: Vec::with_capacity(BUF_SIZE),
            writer,
            bytes_written: 0,
        }
    }

    /// Flush all pending bits and return the total number of bytes written.
    pub fn finish(&mut self) -> Result<usize> {
        LOG.print("Finish");
        self.flush()?;
        Ok(self.bytes_written)
    }

    // Move the pending bits in `data` to the byte buffer, padding the last byte with 0s.
    fn drain_data(&mut self) {
        let num_bytes = ((64 + 7 - self.bits_avail) / 8) as usize;
        if num_bytes > 0 {
            if DEBUG {
                LOG.print(&format!("Adding last {} bytes", num_bytes));
            }
            self.buf
                .extend_from_slice(&self.data.to_be_bytes()[..num_bytes]);
        }
        self.data = 0;
        self.bits_avail = 64;
    }

    // Write the byte buffer out to the writer.
    fn flush_buf(&mut self) -> Result<()> {
        self.writer.write_all(&self.buf)?;
        self.bytes_written += self.buf.len();
        self.buf.clear();
        Ok(())
    }

    // Write 8 bytes to the buffer. Flush the buffer if full.
    fn write_u64(&mut self, data: u64) -> Result<()> {
        if DEBUG {
            LOG.print(&format!("write_u64 {:#x}", data));
        }
        self.buf.extend_from_slice(&data.to_be_bytes());
        if self.buf.len() >= BUF_SIZE {
            self.flush_buf()?;
        }
        Ok(())
    }
}

impl BitSink for BitWriter<'_> {
    fn write_bits(&mut self, data: u64, bits: u32) -> Result<()> {
        debug_assert!(bits <= 64);
        if DEBUG {
            LOG.print(&format!("write_bits {:#x} {}", data, bits));
        }
        let data = low_bits(data, bits);

        // Fast path: we have enough space in self.data.
        if self.bits_avail >= bits {
            self.data |= shift_left(data, self.bits_avail - bits);
            self.bits_avail -= bits;
            return Ok(());
        }

        // Write the bits that fit, and output the 64 bits in self.data.
        let remaining_bits = bits - self.bits_avail;
        let data_to_write = self.data | shift_right(data, remaining_bits);
        self.write_u64(data_to_write)?;

        // Move the remaining bits to self.data.
        let new_bits_avail = 64 - remaining_bits;
        self.data = shift_left(data, new_bits_avail);
        self.bits_avail = new_bits_avail;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        LOG.print("Flush");
        self.drain_data();
        self.flush_buf()?;
        self.writer.flush()?;
        Ok(())
    }
}
