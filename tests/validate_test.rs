//! Schema validator tests

use finetune_prep::validate::{validate_dataset, validate_record, ErrorKind, ErrorTally};
use serde_json::json;

// =============================================================================
// Record-level checks
// =============================================================================

#[test]
fn test_valid_dataset_has_empty_tally() {
    let records = vec![
        json!({"messages": [
            {"role": "system", "content": "You are Marv, a sarcastic chatbot."},
            {"role": "user", "content": "What's the capital of France?"},
            {"role": "assistant", "content": "Paris, as if everyone doesn't know that already."}
        ]}),
        json!({"messages": [
            {"role": "user", "content": "Who wrote Romeo and Juliet?", "name": "student"},
            {"role": "assistant", "content": "Some guy named Shakespeare."}
        ]}),
    ];

    assert!(validate_dataset(&records).is_empty());
}

#[test]
fn test_every_non_object_is_a_data_type_error() {
    let records = vec![json!(null), json!(1), json!("text"), json!([]), json!(true)];
    let tally = validate_dataset(&records);

    assert_eq!(tally.count(ErrorKind::DataType), 5);
    assert_eq!(tally.total(), 5);
}

#[test]
fn test_messages_must_be_a_non_empty_array() {
    let records = vec![
        json!({"conversation": []}),
        json!({"messages": []}),
        json!({"messages": "hello"}),
        json!({"messages": {"role": "user"}}),
    ];
    let tally = validate_dataset(&records);

    assert_eq!(tally.count(ErrorKind::MissingMessagesList), 4);
    assert_eq!(tally.count(ErrorKind::ExampleMissingAssistantMessage), 0);
}

#[test]
fn test_one_record_many_kinds() {
    let record = json!({"messages": [
        {"content": "no role", "tags": ["a"]},
        {"role": "user"},
        {"role": "System", "content": "wrong case"}
    ]});
    let mut tally = ErrorTally::new();
    validate_record(&record, &mut tally);

    // message 1: missing role, extra key, unrecognized role
    // message 2: missing content key, missing content
    // message 3: unrecognized role (case sensitive)
    assert_eq!(tally.count(ErrorKind::MessageMissingKey), 2);
    assert_eq!(tally.count(ErrorKind::MessageUnrecognizedKey), 1);
    assert_eq!(tally.count(ErrorKind::UnrecognizedRole), 2);
    assert_eq!(tally.count(ErrorKind::MissingContent), 1);
    assert_eq!(tally.count(ErrorKind::ExampleMissingAssistantMessage), 1);
    assert_eq!(tally.count(ErrorKind::DataType), 0);
}

#[test]
fn test_missing_assistant_counted_once_per_record() {
    let record = json!({"messages": [
        {"role": "user", "content": "a"},
        {"role": "user", "content": "b"},
        {"role": "system", "content": "c"}
    ]});
    let tally = validate_dataset(&[record.clone(), record]);

    assert_eq!(tally.count(ErrorKind::ExampleMissingAssistantMessage), 2);
    assert_eq!(tally.total(), 2);
}

#[test]
fn test_name_is_a_recognized_key() {
    let record = json!({"messages": [
        {"role": "assistant", "content": "x", "name": "bot"}
    ]});
    assert!(validate_dataset(&[record]).is_empty());
}

#[test]
fn test_extra_top_level_keys_are_ignored() {
    let record = json!({
        "id": 17,
        "messages": [{"role": "assistant", "content": "x"}]
    });
    assert!(validate_dataset(&[record]).is_empty());
}

// =============================================================================
// Tally
// =============================================================================

#[test]
fn test_tally_iterates_observed_kinds_only() {
    let tally = validate_dataset(&[json!(0), json!({"messages": []})]);
    let observed: Vec<_> = tally.iter().collect();

    assert_eq!(
        observed,
        vec![(ErrorKind::DataType, 1), (ErrorKind::MissingMessagesList, 1)]
    );
}

#[test]
fn test_tally_roundtrips_through_json() {
    let tally = validate_dataset(&[json!(0), json!(1), json!({})]);
    let json = serde_json::to_string(&tally).unwrap();
    let back: ErrorTally = serde_json::from_str(&json).unwrap();

    assert_eq!(json, r#"{"data_type":2,"missing_messages_list":1}"#);
    assert_eq!(back, tally);
}
