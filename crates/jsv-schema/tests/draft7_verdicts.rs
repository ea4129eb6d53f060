//! End-to-end verdicts from the Draft-7 engine: which phase rejects which
//! kind of document, and the batch-level guarantees built on top.

use jsv_schema::{
    exit_code_for_batch, BatchValidator, Manifest, ManifestEntry, SchemaValidationService,
    ValidationType,
};
use proptest::prelude::*;
use serde_json::{json, Value};

const SIMPLE_TYPES: [&str; 7] = [
    "array", "boolean", "integer", "null", "number", "object", "string",
];

fn validate(schema: Value) -> jsv_schema::ValidationResult {
    SchemaValidationService::draft7().validate(&schema, "inline")
}

// ---------------------------------------------------------------------------
// Single-schema verdicts
// ---------------------------------------------------------------------------

#[test]
fn string_schema_is_valid_at_compilation() {
    let result = validate(json!({"type": "string"}));
    assert!(result.valid);
    assert!(result.errors.is_empty());
    assert_eq!(result.validation_type, ValidationType::Compilation);
    assert_eq!(result.schema, json!({"type": "string"}));
}

#[test]
fn bogus_type_fails_meta_schema() {
    let result = validate(json!({"type": "bogus-type"}));
    assert!(!result.valid);
    assert_eq!(result.validation_type, ValidationType::MetaSchema);
    assert!(!result.errors.is_empty());
    assert!(!result.compilation_error);
}

#[test]
fn malformed_regex_fails_compilation() {
    let result = validate(json!({
        "type": "object",
        "properties": {"code": {"type": "string", "pattern": "(unbalanced"}}
    }));
    assert!(!result.valid);
    assert_eq!(result.validation_type, ValidationType::Compilation);
    assert!(result.compilation_error);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].message.starts_with("Schema compilation failed: "));
}

#[test]
fn realistic_draft7_document_is_valid() {
    let result = validate(json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "User",
        "type": "object",
        "definitions": {
            "email": {"type": "string", "format": "email", "maxLength": 254}
        },
        "properties": {
            "id": {"type": "integer", "exclusiveMinimum": 0},
            "email": {"$ref": "#/definitions/email"},
            "tags": {"type": "array", "items": {"type": "string"}, "uniqueItems": true},
            "role": {"enum": ["admin", "user", "guest"], "default": "user"},
            "nickname": {"anyOf": [{"type": "string"}, {"type": "null"}]}
        },
        "required": ["id", "email"],
        "additionalProperties": false,
        "if": {"properties": {"role": {"const": "admin"}}},
        "then": {"required": ["tags"]}
    }));
    assert!(result.valid, "errors: {:?}", result.errors);
}

#[test]
fn meta_schema_errors_point_into_the_document() {
    let result = validate(json!({
        "type": "object",
        "properties": {"age": {"type": "integer", "minimum": "zero"}}
    }));
    assert_eq!(result.validation_type, ValidationType::MetaSchema);
    let located = result
        .errors
        .iter()
        .any(|e| e.instance_path.as_deref() == Some("/properties/age/minimum"));
    assert!(located, "errors: {:?}", result.errors);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn type_keyword_is_classified_by_membership(name in "[a-z]{1,9}") {
        let result = validate(json!({"type": name.clone()}));
        if SIMPLE_TYPES.contains(&name.as_str()) {
            prop_assert!(result.valid);
        } else {
            prop_assert_eq!(result.validation_type, ValidationType::MetaSchema);
            prop_assert!(!result.errors.is_empty());
        }
    }

    #[test]
    fn validation_is_idempotent(
        ty in prop::sample::select(SIMPLE_TYPES.to_vec()),
        min_length in -2i64..5,
        pattern in prop::sample::select(vec!["^[a-z]+$", "(", "\\d{2,}", "[z-a]"]),
    ) {
        let schema = json!({"type": ty, "minLength": min_length, "pattern": pattern});
        let service = SchemaValidationService::draft7();
        let first = service.validate(&schema, "s");
        let second = service.validate(&schema, "s");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn batch_entries_are_isolated(validity in prop::collection::vec(any::<bool>(), 1..8)) {
        let dir = tempfile::tempdir().unwrap();
        let mut schemas = Vec::new();
        for (i, valid) in validity.iter().enumerate() {
            let file = format!("s{i}.json");
            let body = if *valid { r#"{"type": "string"}"# } else { r#"{"type": 7}"# };
            std::fs::write(dir.path().join(&file), body).unwrap();
            schemas.push(ManifestEntry { name: format!("s{i}"), path: file, description: None });
        }
        let manifest = Manifest { schemas };

        let service = SchemaValidationService::draft7();
        let report = BatchValidator::new(&service, dir.path()).run(&manifest, "m.json");

        prop_assert_eq!(report.schemas.len(), validity.len());
        for (entry, valid) in report.schemas.iter().zip(&validity) {
            prop_assert_eq!(entry.result.valid, *valid);
        }
        let expected_code = if validity.iter().all(|v| *v) { 0 } else { 1 };
        prop_assert_eq!(exit_code_for_batch(&report), expected_code);
    }
}
