#[cfg(test)]
use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::rc::Rc;

use crate::error::Result;

#[cfg(test)]
struct MemWriter {
    data: Rc<RefCell<Vec<u8>>>,
}

#[cfg(test)]
impl MemWriter {
    pub fn new(data: Rc<RefCell<Vec<u8>>>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
impl io::Write for MemWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

enum OutputSinkType {
    File(PathBuf),
    #[cfg(test)]
    Memory(Rc<RefCell<Vec<u8>>>),
}

/// Output of an encode or decode session.
pub struct OutputSink {
    sink_type: OutputSinkType,
}

impl OutputSink {
    pub fn file(filename: impl AsRef<Path>) -> Self {
        Self {
            sink_type: OutputSinkType::File(filename.as_ref().to_path_buf()),
        }
    }

    #[cfg(test)]
    pub fn memory(data: Vec<u8>) -> Self {
        Self {
            sink_type: OutputSinkType::Memory(Rc::new(RefCell::new(data))),
        }
    }

    /// Open the sink for writing. A file is created or truncated.
    pub fn writer(&mut self) -> Result<Box<dyn Write>> {
        match &self.sink_type {
            OutputSinkType::File(filename) => {
                let file = File::create(filename)?;
                Ok(Box::new(io::BufWriter::new(file)))
            }
            #[cfg(test)]
            OutputSinkType::Memory(data) => Ok(Box::new(MemWriter::new(data.clone()))),
        }
    }

    #[cfg(test)]
    pub fn take_memory(&mut self) -> Vec<u8> {
        match &self.sink_type {
            OutputSinkType::File(_) => Vec::new(),
            OutputSinkType::Memory(data) => data.take(),
        }
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sink_type {
            OutputSinkType::File(filename) => write!(f, "Output file: {}", filename.display()),
            #[cfg(test)]
            OutputSinkType::Memory(_) => write!(f, "Output memory"),
        }
    }
}
