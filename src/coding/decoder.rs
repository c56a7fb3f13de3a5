use std::fmt;

use crate::coding::input::InputSource;
use crate::coding::output::OutputSink;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeResult {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl DecodeResult {
    pub fn new(bytes_read: u64, bytes_written: u64) -> Self {
        Self {
            bytes_read,
            bytes_written,
        }
    }
}

impl fmt::Display for DecodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes read, {} bytes written",
            self.bytes_read, self.bytes_written
        )
    }
}

pub trait Decoder {
    fn decode(&mut self, input: &mut InputSource, output: &mut OutputSink) -> Result<DecodeResult>;
}
