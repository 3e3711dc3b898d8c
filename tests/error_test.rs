//! Tests for error types

use finetune_prep::Error;

#[test]
fn test_empty_sequence_error() {
    let error_str = format!("{}", Error::EmptySequence);
    assert!(error_str.contains("Cannot summarize an empty sequence"));
    assert!(error_str.contains("Guard the call"));
}

#[test]
fn test_empty_dataset_error() {
    let error_str = format!("{}", Error::EmptyDataset);
    assert!(error_str.contains("empty dataset"));
    assert!(error_str.contains("n_train_examples = 0"));
}

#[test]
fn test_tokenizer_error() {
    let error = Error::Tokenizer("text contains disallowed special token <|endoftext|>".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Tokenizer error"));
    assert!(error_str.contains("<|endoftext|>"));
}

#[test]
fn test_parse_error_names_line() {
    let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let error = Error::Parse { line: 12, source };
    let error_str = format!("{error}");
    assert!(error_str.starts_with("Line 12: invalid JSON record"));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("target_epochs must be greater than 0".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("target_epochs"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
}

#[test]
fn test_error_debug() {
    let debug_str = format!("{:?}", Error::EmptyDataset);
    assert!(debug_str.contains("EmptyDataset"));
}

#[test]
fn test_result_type_alias_error() {
    fn returns_error() -> finetune_prep::Result<i32> {
        Err(Error::EmptySequence)
    }

    let result = returns_error();
    assert!(result.is_err());
}
