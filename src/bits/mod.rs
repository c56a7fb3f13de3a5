mod bit_ops;
mod bit_reader;
mod bit_stream;
mod bit_writer;
#[cfg(test)]
mod dev_bit_stream;

pub use bit_reader::BitReader;
pub use bit_stream::{BitSink, BitSource};
pub use bit_writer::BitWriter;
#[cfg(test)]
pub use dev_bit_stream::DevBitStream;
