use crate::bits::{BitSink, BitSource};
use crate::error::{HuffmanError, Result};

/// A bitstream used for development and debugging. Stores one bit per `u8` so the exact
/// bit pattern written by a coder can be inspected.
#[derive(Default)]
pub struct DevBitStream {
    data: Vec<u8>,

    // Read position.
    pos: usize,
}

impl DevBitStream {
    pub fn for_writing() -> Self {
        Self::default()
    }

    pub fn for_reading(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    /// Return number of bits in the bit stream.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Number of bits read so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The written bits.
    pub fn bits(&self) -> &[u8] {
        &self.data
    }

    /// Remove all data from the bit stream.
    pub fn remove_data(&mut self) -> Vec<u8> {
        self.pos = 0;
        std::mem::take(&mut self.data)
    }
}

impl BitSink for DevBitStream {
    fn write_bits(&mut self, data: u64, bits: u32) -> Result<()> {
        for i in (0..bits).rev() {
            self.data.push(((data >> i) & 1) as u8);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        while self.data.len() % 8 != 0 {
            self.data.push(0);
        }
        Ok(())
    }
}

impl BitSource for DevBitStream {
    fn read_bits(&mut self, bits: u32) -> Result<u64> {
        let end = self.pos + bits as usize;
        if end > self.data.len() {
            return Err(HuffmanError::TruncatedStream);
        }
        let value = self.data[self.pos..end]
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | bit as u64);
        self.pos = end;
        Ok(value)
    }

    fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.pos == self.data.len())
    }

    fn size_in_bytes(&self) -> u64 {
        self.data.len().div_ceil(8) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_bit_stream() -> Result<()> {
        let mut writer = DevBitStream::for_writing();
        writer.write_bit(0)?;
        assert_eq!(writer.len(), 1);
        writer.write_bits(0b10, 2)?;
        assert_eq!(writer.bits(), &[0, 1, 0]);

        let mut reader = DevBitStream::for_reading(writer.remove_data());
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.read_bit()?, 0);
        assert_eq!(reader.read_bits(2)?, 0b10);
        assert_eq!(reader.position(), 3);
        assert!(reader.is_at_end()?);
        assert!(reader.read_bit().is_err());
        Ok(())
    }

    #[test]
    fn test_flush_pads_to_byte() -> Result<()> {
        let mut writer = DevBitStream::for_writing();
        writer.write_bits(0b111, 3)?;
        writer.flush()?;
        assert_eq!(writer.bits(), &[1, 1, 1, 0, 0, 0, 0, 0]);
        assert_eq!(writer.size_in_bytes(), 1);
        Ok(())
    }
}
