pub mod chunker;
pub mod expander;

pub use chunker::{ChunkPacker, SENTENCE_DELIMITER};
pub use expander::{RowExpander, RowOutcome};
