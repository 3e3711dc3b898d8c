//! Error types for finetune-prep
//!
//! Malformed dataset records are never errors here: they are counted by the
//! schema validator. These variants cover the conditions that stop an
//! analysis outright.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// finetune-prep error types
#[derive(Error, Debug)]
pub enum Error {
    /// Distribution summary requested over zero samples
    #[error("Cannot summarize an empty sequence\nGuard the call: a dataset with no examples has no distribution")]
    EmptySequence,

    /// Cost estimate requested for a dataset with zero training examples
    #[error("Cannot estimate cost for an empty dataset (n_train_examples = 0)")]
    EmptyDataset,

    /// Tokenizer could not be built or refused the input text
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Input line is not valid JSON
    #[error("Line {line}: invalid JSON record: {source}")]
    Parse {
        /// 1-based line number in the input
        line: usize,
        /// Underlying parser error
        source: serde_json::Error,
    },

    /// Invalid configuration or argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
