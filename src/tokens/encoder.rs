//! Sub-word encoders

use tiktoken_rs::CoreBPE;

use crate::{Error, Result};

/// Text to token-id encoder.
///
/// Implementations must be deterministic and keep no state between calls,
/// so the same text always yields the same ids.
pub trait TokenEncoder: Send + Sync {
    /// Encode `text` into token ids.
    ///
    /// # Errors
    ///
    /// Returns `Error::Tokenizer` if the text cannot be encoded.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Number of tokens in `text`.
    ///
    /// # Errors
    ///
    /// Same as [`TokenEncoder::encode`].
    fn count(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text)?.len())
    }
}

/// Special tokens of the `cl100k_base` vocabulary.
const CL100K_SPECIAL_TOKENS: [&str; 5] = [
    "<|endoftext|>",
    "<|fim_prefix|>",
    "<|fim_middle|>",
    "<|fim_suffix|>",
    "<|endofprompt|>",
];

/// `cl100k_base` BPE encoder (GPT-3.5/GPT-4 vocabulary).
///
/// Special tokens are disallowed: text containing one is rejected rather
/// than silently encoded as a control token.
pub struct Cl100kEncoder {
    bpe: CoreBPE,
}

impl Cl100kEncoder {
    /// Load the embedded `cl100k_base` vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `Error::Tokenizer` if the vocabulary fails to load.
    pub fn new() -> Result<Self> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| Error::Tokenizer(format!("failed to load cl100k_base: {e}")))?;
        Ok(Self { bpe })
    }
}

impl std::fmt::Debug for Cl100kEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cl100kEncoder").finish_non_exhaustive()
    }
}

impl TokenEncoder for Cl100kEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        if let Some(special) = CL100K_SPECIAL_TOKENS.iter().find(|s| text.contains(*s)) {
            return Err(Error::Tokenizer(format!(
                "text contains disallowed special token {special}"
            )));
        }
        Ok(self.bpe.encode_ordinary(text))
    }
}

/// One token per whitespace-separated word.
///
/// A cheap deterministic stand-in for a real vocabulary, used for quick
/// estimates, tests and benchmarks. Ids are word byte lengths.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceEncoder;

impl TokenEncoder for WhitespaceEncoder {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text
            .split_whitespace()
            .map(|word| u32::try_from(word.len()).unwrap_or(u32::MAX))
            .collect())
    }
}

impl<E: TokenEncoder + ?Sized> TokenEncoder for &E {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_encoder_counts_words() {
        let encoder = WhitespaceEncoder;
        assert_eq!(encoder.count("one two  three\nfour").unwrap(), 4);
        assert_eq!(encoder.count("").unwrap(), 0);
        assert_eq!(encoder.encode("ab cde").unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_cl100k_is_stable() {
        let encoder = Cl100kEncoder::new().unwrap();
        let first = encoder.encode("Hello, world!").unwrap();
        let second = encoder.encode("Hello, world!").unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
        assert!(first.len() < 10);
    }

    #[test]
    fn test_cl100k_rejects_special_tokens() {
        let encoder = Cl100kEncoder::new().unwrap();
        let err = encoder.encode("done <|endoftext|>").unwrap_err();
        assert!(matches!(err, Error::Tokenizer(_)));
    }

    #[test]
    fn test_cl100k_empty_text() {
        let encoder = Cl100kEncoder::new().unwrap();
        assert_eq!(encoder.count("").unwrap(), 0);
    }
}
