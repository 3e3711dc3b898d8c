//! Record - typed view of one training conversation

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System prompt
    System,
    /// End-user turn
    User,
    /// Model turn (the only role trained on)
    Assistant,
}

impl Role {
    /// All recognized roles.
    pub const ALL: [Self; 3] = [Self::System, Self::User, Self::Assistant];

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Parse a wire name. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(role: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == role)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    role: Role,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Message {
    /// Create a message without a participant name.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }

    /// Attach a participant name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Get the content text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the participant name, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// One training example: an ordered list of messages.
///
/// Records are immutable once built. The validator works on the raw
/// [`Value`] form so it can report records this type cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    messages: Vec<Message>,
}

impl Record {
    /// Create a record from its messages.
    #[must_use]
    pub const fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Typed view of a raw record.
    ///
    /// Returns `None` when the raw value does not fit the message schema
    /// (unknown role, extra keys, non-text content, ...). Extra top-level
    /// keys next to `messages` are ignored.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let messages = value.as_object()?.get("messages")?;
        serde_json::from_value(messages.clone())
            .ok()
            .map(Self::new)
    }

    /// Get the messages in order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Whether any message has the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.messages.iter().any(|m| m.role() == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!(Role::parse("assistant"), Some(Role::Assistant));
        assert_eq!(Role::parse("Assistant"), None);
        assert_eq!(Role::parse("tool"), None);
    }

    #[test]
    fn test_record_from_value() {
        let value = json!({"messages": [
            {"role": "system", "content": "be terse"},
            {"role": "user", "content": "hi", "name": "bob"},
            {"role": "assistant", "content": "hello"}
        ]});
        let record = Record::from_value(&value).unwrap();
        assert_eq!(record.message_count(), 3);
        assert_eq!(record.messages()[1].name(), Some("bob"));
        assert!(record.has_role(Role::Assistant));
    }

    #[test]
    fn test_record_from_value_rejects_unknown_key() {
        let value = json!({"messages": [{"role": "user", "content": "hi", "weight": 1}]});
        assert!(Record::from_value(&value).is_none());
    }

    #[test]
    fn test_record_from_value_rejects_non_object() {
        assert!(Record::from_value(&json!(["messages"])).is_none());
        assert!(Record::from_value(&json!({"prompt": "x"})).is_none());
    }

    #[test]
    fn test_message_serialization_omits_missing_name() {
        let json = serde_json::to_string(&Message::new(Role::User, "hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
