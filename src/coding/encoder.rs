use std::fmt;

use crate::coding::input::InputSource;
use crate::coding::output::OutputSink;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeResult {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl EncodeResult {
    pub fn new(bytes_read: u64, bytes_written: u64) -> Self {
        Self {
            bytes_read,
            bytes_written,
        }
    }

    /// Output size relative to the input size.
    pub fn ratio(&self) -> f64 {
        if self.bytes_read == 0 {
            0.0
        } else {
            self.bytes_written as f64 / self.bytes_read as f64
        }
    }
}

impl fmt::Display for EncodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes read, {} bytes written ({:.1}%)",
            self.bytes_read,
            self.bytes_written,
            self.ratio() * 100.0
        )
    }
}

pub trait Encoder {
    fn encode(&mut self, input: &mut InputSource, output: &mut OutputSink) -> Result<EncodeResult>;
}
