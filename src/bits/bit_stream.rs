use crate::error::Result;

/// Destination of a bit stream. Bits are written most significant first.
pub trait BitSink {
    /// Write the low `bits` bits of `data`, most significant first.
    fn write_bits(&mut self, data: u64, bits: u32) -> Result<()>;

    /// Write a single bit (0 or 1).
    fn write_bit(&mut self, bit: u8) -> Result<()> {
        self.write_bits((bit & 1) as u64, 1)
    }

    /// Write a 32-bit integer, most significant byte first.
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bits(value as u64, 32)
    }

    /// Emit all buffered bits. A partial last byte is padded with 0 bits, so the next
    /// write starts on a byte boundary.
    fn flush(&mut self) -> Result<()>;
}

/// Source of a bit stream. Bits are read most significant first.
pub trait BitSource {
    /// Read the next `bits` bits. Returned value is lsb-aligned.
    /// Fails with `TruncatedStream` if fewer than `bits` bits remain.
    fn read_bits(&mut self, bits: u32) -> Result<u64>;

    /// Read a single bit.
    fn read_bit(&mut self) -> Result<u8> {
        Ok(self.read_bits(1)? as u8)
    }

    /// Read a 32-bit integer, most significant byte first.
    fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_bits(32)? as u32)
    }

    /// Returns true if no more bits can be read.
    fn is_at_end(&mut self) -> Result<bool>;

    /// Total size of the underlying data in bytes.
    fn size_in_bytes(&self) -> u64;
}
