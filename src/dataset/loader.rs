//! Line-oriented JSONL loader

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::Value;

use crate::{Error, Result};

/// Parse one raw record per non-blank line.
///
/// Records are returned as raw JSON so the schema validator sees exactly
/// what was on disk. Blank lines are skipped.
///
/// # Errors
///
/// Returns `Error::Parse` (with the 1-based line number) for the first line
/// that is not valid JSON, or `Error::Io` if reading fails.
pub fn load_jsonl<R: BufRead>(reader: R) -> Result<Vec<Value>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| Error::Parse {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Open `path` and load it with [`load_jsonl`].
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened, otherwise whatever
/// [`load_jsonl`] returns.
pub fn load_jsonl_path(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let file = File::open(path)?;
    load_jsonl(BufReader::new(file))
}
