//! Error taxonomy and tally

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Kind of structural problem found in a record.
///
/// Every kind is advisory: it is counted, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Record is not a JSON object
    DataType,
    /// Record has no non-empty `messages` list
    MissingMessagesList,
    /// Message lacks `role` or `content`
    MessageMissingKey,
    /// Message has a key outside `role`, `content`, `name`
    MessageUnrecognizedKey,
    /// Message role is absent or not system/user/assistant
    UnrecognizedRole,
    /// Message content is absent, empty, or not text
    MissingContent,
    /// Record has no assistant message
    ExampleMissingAssistantMessage,
}

impl ErrorKind {
    /// All kinds, in reporting order.
    pub const ALL: [Self; 7] = [
        Self::DataType,
        Self::MissingMessagesList,
        Self::MessageMissingKey,
        Self::MessageUnrecognizedKey,
        Self::UnrecognizedRole,
        Self::MissingContent,
        Self::ExampleMissingAssistantMessage,
    ];

    /// Taxonomy name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DataType => "data_type",
            Self::MissingMessagesList => "missing_messages_list",
            Self::MessageMissingKey => "message_missing_key",
            Self::MessageUnrecognizedKey => "message_unrecognized_key",
            Self::UnrecognizedRole => "unrecognized_role",
            Self::MissingContent => "missing_content",
            Self::ExampleMissingAssistantMessage => "example_missing_assistant_message",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence count per [`ErrorKind`].
///
/// Kinds that never occurred are absent rather than stored as zero, so
/// an empty tally means a clean dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorTally {
    counts: BTreeMap<ErrorKind, usize>,
}

impl ErrorTally {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `kind`.
    pub fn record(&mut self, kind: ErrorKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Occurrences of `kind` (zero if never seen).
    #[must_use]
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Occurrences across all kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Whether no problem was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Observed kinds with their counts, in [`ErrorKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ErrorKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Add another (partial) tally into this one.
    pub fn merge(&mut self, other: &Self) {
        for (kind, count) in other.iter() {
            *self.counts.entry(kind).or_insert(0) += count;
        }
    }
}
