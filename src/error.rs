use std::io;

use thiserror::Error;

/// Errors produced while building, writing or reading a Huffman coded stream.
#[derive(Error, Debug)]
pub enum HuffmanError {
    #[error("Input has no symbols")]
    EmptyInput,

    #[error("Symbol {0:#04x} is not in the coding tree")]
    UnknownSymbol(u8),

    #[error("Bit stream ended before the data was complete")]
    TruncatedStream,

    #[error("Corrupt tree encoding: {0}")]
    CorruptTree(&'static str),

    #[error("Symbol count {0} does not fit in the 32-bit header")]
    CountOverflow(u64),

    #[error("Input changed during compression: counted {expected} bytes, read {actual}")]
    InputChanged { expected: u64, actual: u64 },

    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
