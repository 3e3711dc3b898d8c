//! Schema validation for chat fine-tuning records
//!
//! The validator never rejects a dataset. It walks every record and counts
//! each structural problem into an [`ErrorTally`]; one record can contribute
//! to several kinds at once.
//!
//! ## Checks (per record, in order)
//!
//! 1. Not a JSON object: `data_type`, stop.
//! 2. No non-empty `messages` array: `missing_messages_list`, stop.
//! 3. Per message, all of:
//!    - `role` or `content` absent: `message_missing_key`
//!    - key outside `role`/`content`/`name`: `message_unrecognized_key`
//!    - role absent or not system/user/assistant: `unrecognized_role`
//!    - content absent, empty or not text: `missing_content`
//! 4. No assistant message: `example_missing_assistant_message`.
//!
//! The missing-key and unrecognized-key checks overlap on purpose: a
//! message lacking `content` but carrying `weight` counts under both.
//!
//! ## Usage
//!
//! ```rust
//! use finetune_prep::validate::{validate_dataset, ErrorKind};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"messages": [{"role": "user", "content": "hi"}]}),
//!     json!("not an object"),
//! ];
//! let tally = validate_dataset(&records);
//!
//! assert_eq!(tally.count(ErrorKind::DataType), 1);
//! assert_eq!(tally.count(ErrorKind::ExampleMissingAssistantMessage), 1);
//! ```

mod tally;

pub use tally::{ErrorKind, ErrorTally};

use serde_json::{Map, Value};

use crate::dataset::Role;

const RECOGNIZED_KEYS: [&str; 3] = ["role", "content", "name"];

/// Validate every record and return the accumulated tally.
#[must_use]
pub fn validate_dataset(records: &[Value]) -> ErrorTally {
    let mut tally = ErrorTally::new();
    for record in records {
        validate_record(record, &mut tally);
    }
    tracing::debug!(
        records = records.len(),
        problems = tally.total(),
        "validation pass complete"
    );
    tally
}

/// Parallel [`validate_dataset`]: each worker folds a partial tally and the
/// partials are merged. Counts are identical to the sequential pass.
#[cfg(feature = "rayon")]
#[must_use]
pub fn validate_dataset_par(records: &[Value]) -> ErrorTally {
    use rayon::prelude::*;

    let tally = records
        .par_iter()
        .fold(ErrorTally::new, |mut tally, record| {
            validate_record(record, &mut tally);
            tally
        })
        .reduce(ErrorTally::new, |mut a, b| {
            a.merge(&b);
            a
        });
    tracing::debug!(
        records = records.len(),
        problems = tally.total(),
        "parallel validation pass complete"
    );
    tally
}

/// Count the problems of a single record into `tally`.
pub fn validate_record(record: &Value, tally: &mut ErrorTally) {
    let Some(object) = record.as_object() else {
        tally.record(ErrorKind::DataType);
        return;
    };

    let messages = match object.get("messages").and_then(Value::as_array) {
        Some(messages) if !messages.is_empty() => messages,
        _ => {
            tally.record(ErrorKind::MissingMessagesList);
            return;
        }
    };

    let empty = Map::new();
    let mut has_assistant = false;

    for message in messages {
        // Non-object messages have no keys at all.
        let fields = message.as_object().unwrap_or(&empty);

        if !fields.contains_key("role") || !fields.contains_key("content") {
            tally.record(ErrorKind::MessageMissingKey);
        }

        if fields.keys().any(|k| !RECOGNIZED_KEYS.contains(&k.as_str())) {
            tally.record(ErrorKind::MessageUnrecognizedKey);
        }

        match fields.get("role").and_then(Value::as_str).and_then(Role::parse) {
            Some(Role::Assistant) => has_assistant = true,
            Some(_) => {}
            None => tally.record(ErrorKind::UnrecognizedRole),
        }

        match fields.get("content").and_then(Value::as_str) {
            Some(content) if !content.is_empty() => {}
            _ => tally.record(ErrorKind::MissingContent),
        }
    }

    if !has_assistant {
        tally.record(ErrorKind::ExampleMissingAssistantMessage);
    }
}
