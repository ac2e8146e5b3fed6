use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input table not found: {0}")]
    InputNotFound(String),

    #[error("Input row {row} has {found} columns (expected at least {expected})")]
    MissingColumns {
        row: u64,
        found: usize,
        expected: usize,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Tokenizer error: {0}")]
    TokenizerError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Embedding API error ({status}): {body}")]
    EmbeddingApiError { status: u16, body: String },

    #[error("Invalid embedding response: {0}")]
    InvalidEmbeddingResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration load error: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
}

