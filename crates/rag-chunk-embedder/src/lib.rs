pub mod config;
pub mod document;
pub mod embedding;
pub mod pipeline;
pub mod table;
pub mod tokenizer;
pub mod utils;

pub use config::Settings;
pub use document::{ChunkPacker, RowExpander};
pub use embedding::{EmbeddingProvider, LlamaServerEmbedder, OpenAiEmbedder};
pub use pipeline::{EmbeddingPipeline, PipelineSummary};
pub use tokenizer::{TiktokenCounter, TokenCounter};
pub use utils::error::PipelineError;
