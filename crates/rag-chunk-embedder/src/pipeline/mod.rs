pub mod processor;

pub use processor::{EmbeddingPipeline, PipelineSummary};
