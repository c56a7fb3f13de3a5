use std::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::rc::Rc;

use crate::error::Result;
use crate::huffman::{WeightType, NUM_SYMBOLS};

// Read buffer size for the frequency pass.
const READ_BUFFER_SIZE: usize = 8 * 1024;

#[cfg(test)]
struct MemReader {
    data: Rc<Vec<u8>>,
    pos: usize,
}

#[cfg(test)]
impl MemReader {
    pub fn new(data: Rc<Vec<u8>>) -> Self {
        Self { data, pos: 0 }
    }
}

#[cfg(test)]
impl io::Read for MemReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.data.len() - self.pos;
        let to_read = buf.len().min(available);
        buf[..to_read].copy_from_slice(&self.data[self.pos..self.pos + to_read]);
        self.pos += to_read;
        Ok(to_read)
    }
}

enum InputSourceType {
    File(PathBuf),
    #[cfg(test)]
    Memory(Rc<Vec<u8>>),
}

/// Input of an encode or decode session. Can be opened more than once.
pub struct InputSource {
    source_type: InputSourceType,
}

impl InputSource {
    pub fn file(filename: impl AsRef<Path>) -> Self {
        Self {
            source_type: InputSourceType::File(filename.as_ref().to_path_buf()),
        }
    }

    #[cfg(test)]
    pub fn memory(data: Vec<u8>) -> Self {
        Self {
            source_type: InputSourceType::Memory(Rc::new(data)),
        }
    }

    #[cfg(test)]
    pub fn take_memory(self) -> Vec<u8> {
        match self.source_type {
            InputSourceType::File(_) => Vec::new(),
            InputSourceType::Memory(data) => Rc::into_inner(data).unwrap_or_default(),
        }
    }

    /// Size of the input in bytes.
    pub fn len(&self) -> Result<u64> {
        match &self.source_type {
            InputSourceType::File(filename) => Ok(std::fs::metadata(filename)?.len()),
            #[cfg(test)]
            InputSourceType::Memory(data) => Ok(data.len() as u64),
        }
    }

    /// Count the occurrences of every byte value.
    pub fn frequencies(&self) -> Result<[WeightType; NUM_SYMBOLS]> {
        let mut frequencies = [0; NUM_SYMBOLS];
        let mut reader = self.reader()?;
        let mut buffer: Box<[u8; READ_BUFFER_SIZE]> = Box::new([0; READ_BUFFER_SIZE]);
        loop {
            let bytes_read = match reader.read(buffer.as_mut_slice()) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in buffer[..bytes_read].iter() {
                frequencies[byte as usize] += 1;
            }
        }
        Ok(frequencies)
    }

    pub fn reader(&self) -> Result<Box<dyn io::Read>> {
        match &self.source_type {
            InputSourceType::File(filename) => {
                let file = File::open(filename)?;
                Ok(Box::new(io::BufReader::new(file)))
            }
            #[cfg(test)]
            InputSourceType::Memory(data) => Ok(Box::new(MemReader::new(data.clone()))),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_type {
            InputSourceType::File(filename) => write!(f, "Input file: {}", filename.display()),
            #[cfg(test)]
            InputSourceType::Memory(data) => write!(f, "Input memory: {:?} bytes", data.len()),
        }
    }
}
