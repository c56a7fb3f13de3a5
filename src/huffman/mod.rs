mod codec;
mod heap;
mod node;
mod serialize;
mod tree;

pub use node::WeightType;
pub use tree::{HuffmanTree, NUM_SYMBOLS};
