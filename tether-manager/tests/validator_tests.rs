//! Validator spec: required-keys and typed-keys checks.

mod common;

use common::fields;
use pretty_assertions::assert_eq;
use serde_json::json;
use tether_manager::{ManagerError, ValidatorSpec, ValueKind};

// ── ValueKind ─────────────────────────────────────────────────────

#[test]
fn value_kind_of_covers_all_kinds() {
    assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
    assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
    assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Number);
    assert_eq!(ValueKind::of(&json!("s")), ValueKind::String);
    assert_eq!(ValueKind::of(&json!([1])), ValueKind::Array);
    assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
}

#[test]
fn value_kind_matches() {
    assert!(ValueKind::String.matches(&json!("hello")));
    assert!(!ValueKind::String.matches(&json!(42)));
}

// ── RequiredKeys ──────────────────────────────────────────────────

#[test]
fn required_keys_accepts_present_keys() {
    let spec = ValidatorSpec::required(["msg", "who"]);
    let payload = fields(json!({"msg": "hi", "who": "aaron", "extra": 1}));
    assert!(spec.validate(&payload).is_ok());
}

#[test]
fn required_keys_ignores_value_types() {
    let spec = ValidatorSpec::required(["msg"]);
    let payload = fields(json!({"msg": 42}));
    assert!(spec.validate(&payload).is_ok());
}

#[test]
fn required_keys_rejects_missing_key() {
    let spec = ValidatorSpec::required(["msg", "who"]);
    let payload = fields(json!({"msg": "hi"}));
    let result = spec.validate(&payload);
    match result {
        Err(ManagerError::Validation { payload, spec }) => {
            assert_eq!(payload["msg"], json!("hi"));
            assert!(spec.contains("who"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn required_keys_never_checks_entries() {
    let spec = ValidatorSpec::required(["msg"]);
    assert!(spec.validate_entry("msg", &json!(42)).is_ok());
}

// ── TypedKeys ─────────────────────────────────────────────────────

#[test]
fn typed_keys_accepts_matching_kinds() {
    let spec = ValidatorSpec::typed([
        ("msg", ValueKind::String),
        ("count", ValueKind::Number),
    ]);
    let payload = fields(json!({"msg": "hi", "count": 3}));
    assert!(spec.validate(&payload).is_ok());
}

#[test]
fn typed_keys_rejects_wrong_kind() {
    let spec = ValidatorSpec::typed([("msg", ValueKind::String)]);
    let payload = fields(json!({"msg": 42}));
    assert!(spec.validate(&payload).is_err());
}

#[test]
fn typed_keys_rejects_missing_key() {
    let spec = ValidatorSpec::typed([("msg", ValueKind::String)]);
    let payload = fields(json!({"other": "hi"}));
    assert!(spec.validate(&payload).is_err());
}

#[test]
fn typed_entry_checks_declared_key() {
    let spec = ValidatorSpec::typed([("msg", ValueKind::String)]);
    assert!(spec.validate_entry("msg", &json!("hi")).is_ok());
    assert!(spec.validate_entry("msg", &json!(42)).is_err());
}

#[test]
fn typed_entry_skips_undeclared_key() {
    let spec = ValidatorSpec::typed([("msg", ValueKind::String)]);
    assert!(spec.validate_entry("age", &json!(42)).is_ok());
}
