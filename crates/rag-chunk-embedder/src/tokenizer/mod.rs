//! Token counting used for budgeting chunks.
//!
//! The pipeline only ever needs a length, so everything goes through the
//! [`TokenCounter`] trait. Tests plug in cheap deterministic counters.

pub mod tiktoken;

pub use tiktoken::TiktokenCounter;

pub trait TokenCounter: Send + Sync {
    /// Number of tokens `text` encodes to. Must be deterministic.
    fn count(&self, text: &str) -> usize;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}
