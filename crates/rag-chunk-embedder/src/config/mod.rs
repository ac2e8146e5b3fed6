pub mod settings;

pub use settings::{
    ChunkingConfig, EmbeddingConfig, EmbeddingProviderKind, InputConfig, OutputConfig,
    ReportConfig, Settings, TokenizerConfig, TokenizerEncoding, TrailingChunk,
};
