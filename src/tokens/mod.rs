//! Token accounting
//!
//! Converts a record's messages into token counts using an injected
//! [`TokenEncoder`]. The encoder is passed in rather than held globally so
//! tests can substitute a deterministic stub such as [`WhitespaceEncoder`].
//!
//! ## Usage
//!
//! ```rust
//! use finetune_prep::dataset::{Message, Role};
//! use finetune_prep::tokens::{TokenAccountant, WhitespaceEncoder};
//!
//! let accountant = TokenAccountant::new(&WhitespaceEncoder);
//! let messages = vec![
//!     Message::new(Role::User, "What is Rust?"),
//!     Message::new(Role::Assistant, "A systems language."),
//! ];
//!
//! let total = accountant.total_tokens_from_messages(&messages)?;
//! let assistant = accountant.assistant_tokens_from_messages(&messages)?;
//! assert!(assistant <= total);
//! # Ok::<(), finetune_prep::Error>(())
//! ```

mod accountant;
mod encoder;

pub use accountant::{TokenAccountant, TokenCounts, TokenOverhead};
pub use encoder::{Cl100kEncoder, TokenEncoder, WhitespaceEncoder};
