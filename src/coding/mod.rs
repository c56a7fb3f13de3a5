mod decoder;
mod encoder;
mod huffman_coding;
mod input;
mod output;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use huffman_coding::{HuffmanDecoder, HuffmanEncoder};
pub use input::InputSource;
pub use output::OutputSink;
