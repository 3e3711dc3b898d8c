//! Dataset record model and loading
//!
//! A dataset is a JSONL file with one conversation per line:
//!
//! ```text
//! {"messages": [{"role": "system", "content": "..."},
//!               {"role": "user", "content": "..."},
//!               {"role": "assistant", "content": "..."}]}
//! ```
//!
//! Records are loaded as raw [`serde_json::Value`]s and only given a typed
//! [`Record`] view once the token accountant needs one.
//!
//! ## Usage
//!
//! ```rust
//! use finetune_prep::dataset::{load_jsonl, Record, Role};
//!
//! let input = r#"{"messages": [{"role": "user", "content": "hi"}, {"role": "assistant", "content": "hello"}]}"#;
//! let records = load_jsonl(input.as_bytes())?;
//!
//! let record = Record::from_value(&records[0]).unwrap();
//! assert!(record.has_role(Role::Assistant));
//! # Ok::<(), finetune_prep::Error>(())
//! ```

mod loader;
mod record;

pub use loader::{load_jsonl, load_jsonl_path};
pub use record::{Message, Record, Role};
