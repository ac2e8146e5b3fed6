use super::TokenCounter;
use crate::config::TokenizerEncoding;
use crate::utils::error::{PipelineError, Result};
use tiktoken_rs::CoreBPE;
use tracing::debug;

/// BPE token counter backed by `tiktoken-rs`.
pub struct TiktokenCounter {
    bpe: CoreBPE,
    encoding: TokenizerEncoding,
}

impl TiktokenCounter {
    pub fn new(encoding: TokenizerEncoding) -> Result<Self> {
        let bpe = match encoding {
            TokenizerEncoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            TokenizerEncoding::O200kBase => tiktoken_rs::o200k_base(),
            TokenizerEncoding::P50kBase => tiktoken_rs::p50k_base(),
            TokenizerEncoding::R50kBase => tiktoken_rs::r50k_base(),
        }
        .map_err(|e| PipelineError::TokenizerError(format!("{:?}: {}", encoding, e)))?;

        debug!("Loaded tokenizer encoding {:?}", encoding);

        Ok(Self { bpe, encoding })
    }

    pub fn encoding(&self) -> TokenizerEncoding {
        self.encoding
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        // special tokens in scraped text are plain text, not control tokens
        self.bpe.encode_ordinary(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cl100k_counts() {
        let counter = TiktokenCounter::new(TokenizerEncoding::Cl100kBase).unwrap();
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("hello world"), 2);
        assert_eq!(counter.encoding(), TokenizerEncoding::Cl100kBase);
    }

    #[test]
    fn test_leading_space_is_counted_consistently() {
        let counter = TiktokenCounter::new(TokenizerEncoding::Cl100kBase).unwrap();
        let plain = counter.count("The quick brown fox");
        let spaced = counter.count(" The quick brown fox");
        assert!(plain > 0);
        assert!(spaced >= plain);
        assert_eq!(spaced, counter.count(" The quick brown fox"));
    }

    #[test]
    fn test_special_tokens_are_ordinary_text() {
        let counter = TiktokenCounter::new(TokenizerEncoding::Cl100kBase).unwrap();
        assert!(counter.count("<|endoftext|>") > 1);
    }

    #[test]
    fn test_closure_counter() {
        let words = |text: &str| text.split_whitespace().count();
        assert_eq!(TokenCounter::count(&words, "one two three"), 3);
    }
}
