//! Token Accountant - per-record token counts

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TokenEncoder;
use crate::dataset::{Message, Record, Role};
use crate::Result;

/// Chat-format overhead added on top of encoded text.
///
/// The defaults approximate the framing of GPT-3.5/GPT-4 chat prompts. The
/// resulting count is an estimate, not the exact number the serving side
/// bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOverhead {
    /// Added once per message (role/turn markers)
    #[serde(default = "default_tokens_per_message")]
    pub tokens_per_message: usize,
    /// Added on top of the name text when a message carries `name`
    #[serde(default = "default_tokens_per_name")]
    pub tokens_per_name: usize,
    /// Added once per conversation (reply priming)
    #[serde(default = "default_reply_priming")]
    pub reply_priming: usize,
}

const fn default_tokens_per_message() -> usize {
    3
}

const fn default_tokens_per_name() -> usize {
    1
}

const fn default_reply_priming() -> usize {
    3
}

impl Default for TokenOverhead {
    fn default() -> Self {
        Self {
            tokens_per_message: default_tokens_per_message(),
            tokens_per_name: default_tokens_per_name(),
            reply_priming: default_reply_priming(),
        }
    }
}

/// Token counts derived from one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenCounts {
    /// All encoded fields plus chat-format overhead
    pub total: usize,
    /// Encoded content of assistant messages only
    pub assistant_only: usize,
    /// Number of messages
    pub message_count: usize,
}

/// Counts tokens of message lists with an injected encoder.
#[derive(Debug)]
pub struct TokenAccountant<'a, E: ?Sized> {
    encoder: &'a E,
    overhead: TokenOverhead,
}

impl<'a, E: TokenEncoder + ?Sized> TokenAccountant<'a, E> {
    /// Create an accountant with the default overhead.
    #[must_use]
    pub fn new(encoder: &'a E) -> Self {
        Self::with_overhead(encoder, TokenOverhead::default())
    }

    /// Create an accountant with a custom overhead.
    #[must_use]
    pub const fn with_overhead(encoder: &'a E, overhead: TokenOverhead) -> Self {
        Self { encoder, overhead }
    }

    /// Get the overhead in use.
    #[must_use]
    pub const fn overhead(&self) -> TokenOverhead {
        self.overhead
    }

    /// Approximate prompt size of `messages`.
    ///
    /// Each message costs `tokens_per_message` plus the encoded length of
    /// every field (role, content, name); a name costs `tokens_per_name`
    /// extra. The conversation then costs `reply_priming` once. An empty
    /// list therefore yields exactly `reply_priming`.
    ///
    /// # Errors
    ///
    /// Propagates encoder failures.
    pub fn total_tokens_from_messages(&self, messages: &[Message]) -> Result<usize> {
        let mut num_tokens: usize = 0;
        for message in messages {
            num_tokens = num_tokens
                .saturating_add(self.overhead.tokens_per_message)
                .saturating_add(self.encoder.count(message.role().as_str())?)
                .saturating_add(self.encoder.count(message.content())?);
            if let Some(name) = message.name() {
                num_tokens = num_tokens
                    .saturating_add(self.encoder.count(name)?)
                    .saturating_add(self.overhead.tokens_per_name);
            }
        }
        Ok(num_tokens.saturating_add(self.overhead.reply_priming))
    }

    /// Encoded length of assistant content only (what training learns from).
    ///
    /// # Errors
    ///
    /// Propagates encoder failures.
    pub fn assistant_tokens_from_messages(&self, messages: &[Message]) -> Result<usize> {
        messages
            .iter()
            .filter(|m| m.role() == Role::Assistant)
            .try_fold(0usize, |sum, m| Ok(sum.saturating_add(self.encoder.count(m.content())?)))
    }

    /// All counts for one record.
    ///
    /// # Errors
    ///
    /// Propagates encoder failures.
    pub fn count(&self, record: &Record) -> Result<TokenCounts> {
        let messages = record.messages();
        Ok(TokenCounts {
            total: self.total_tokens_from_messages(messages)?,
            assistant_only: self.assistant_tokens_from_messages(messages)?,
            message_count: messages.len(),
        })
    }

    /// [`TokenAccountant::total_tokens_from_messages`] over raw JSON messages.
    ///
    /// Every string-valued field is encoded as-is, whatever its key or role
    /// value, and a `name` field costs `tokens_per_name` extra. Non-text
    /// values and non-object messages contribute only `tokens_per_message`.
    ///
    /// # Errors
    ///
    /// Propagates encoder failures.
    pub fn total_tokens_from_raw(&self, messages: &[Value]) -> Result<usize> {
        let mut num_tokens: usize = 0;
        for message in messages {
            num_tokens = num_tokens.saturating_add(self.overhead.tokens_per_message);
            let Some(fields) = message.as_object() else {
                continue;
            };
            for (key, value) in fields {
                let Some(text) = value.as_str() else {
                    continue;
                };
                num_tokens = num_tokens.saturating_add(self.encoder.count(text)?);
                if key == "name" {
                    num_tokens = num_tokens.saturating_add(self.overhead.tokens_per_name);
                }
            }
        }
        Ok(num_tokens.saturating_add(self.overhead.reply_priming))
    }

    /// Encoded content of raw messages whose role is exactly `"assistant"`.
    ///
    /// # Errors
    ///
    /// Propagates encoder failures.
    pub fn assistant_tokens_from_raw(&self, messages: &[Value]) -> Result<usize> {
        messages
            .iter()
            .filter(|m| m.get("role").and_then(Value::as_str) == Some(Role::Assistant.as_str()))
            .filter_map(|m| m.get("content").and_then(Value::as_str))
            .try_fold(0usize, |sum, content| {
                Ok(sum.saturating_add(self.encoder.count(content)?))
            })
    }

    /// All counts for one raw `messages` array.
    ///
    /// # Errors
    ///
    /// Propagates encoder failures.
    pub fn count_raw(&self, messages: &[Value]) -> Result<TokenCounts> {
        Ok(TokenCounts {
            total: self.total_tokens_from_raw(messages)?,
            assistant_only: self.assistant_tokens_from_raw(messages)?,
            message_count: messages.len(),
        })
    }
}
