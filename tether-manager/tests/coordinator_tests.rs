//! Shared coordinator behavior: path resolution, type guard, uniqueness,
//! and two-phase write compensation.

mod common;

use common::{Harness, RejectingRelational, StuckRemote, child_count, fields, harness};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tether_manager::{Adaptor, AppendLogManager, ManagerConfig, ManagerError};
use tether_remote::RemoteStore;
use tether_types::EntityType;

fn manager_with(h: &Harness, config: ManagerConfig) -> AppendLogManager {
    AppendLogManager::new(h.adaptor.clone(), config).expect("manager")
}

// ── Base path resolution ──────────────────────────────────────────

#[test]
fn default_path_is_lowercased_type_name() {
    let h = harness();
    let manager = manager_with(&h, ManagerConfig::new(EntityType::new("Chat")));
    assert_eq!(manager.base_path(), "chat");
}

#[test]
fn explicit_path_overrides_default() {
    let h = harness();
    let manager = manager_with(
        &h,
        ManagerConfig::new(EntityType::new("Chat")).with_path("rooms"),
    );
    assert_eq!(manager.base_path(), "rooms");
}

#[test]
fn segment_list_is_joined() {
    let h = harness();
    let manager = manager_with(
        &h,
        ManagerConfig::new(EntityType::new("Chat")).with_path(vec![
            "org/".to_string(),
            "/team/".to_string(),
            "chats".to_string(),
        ]),
    );
    assert_eq!(manager.base_path(), "org/team/chats");
}

#[test]
fn missing_base_path_is_config_error() {
    let h = harness();
    let result = AppendLogManager::new(h.adaptor.clone(), ManagerConfig::new(EntityType::new("")));
    assert!(matches!(result, Err(ManagerError::Config(_))));
}

#[test]
fn managers_register_bindings_on_adaptor() {
    let h = harness();
    let _chats = manager_with(&h, ManagerConfig::new(EntityType::new("Chat")));
    let _profiles = manager_with(
        &h,
        ManagerConfig::new(EntityType::new("Profile")).with_path("people"),
    );
    let bindings = h.adaptor.bindings();
    assert_eq!(bindings.get("chat").map(String::as_str), Some("chat"));
    assert_eq!(bindings.get("profile").map(String::as_str), Some("people"));
}

// ── Type guard ────────────────────────────────────────────────────

#[test]
fn foreign_record_is_rejected() {
    let h = harness();
    let chats = manager_with(&h, ManagerConfig::new(EntityType::new("Chat")));
    let profiles = manager_with(&h, ManagerConfig::new(EntityType::new("Profile")));

    let profile = profiles.add(fields(json!({"nick": "aaron"}))).unwrap();
    let result = chats.get(&profile, None);
    match result {
        Err(ManagerError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, "Chat");
            assert_eq!(actual, "Profile");
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
    assert!(matches!(
        chats.delete(&profile),
        Err(ManagerError::TypeMismatch { .. })
    ));
    // the record is untouched through its own manager
    assert!(profiles.get(&profile, None).unwrap().is_some());
}

// ── Uniqueness ────────────────────────────────────────────────────

#[test]
fn silent_unique_returns_same_record() {
    let h = harness();
    let manager = manager_with(
        &h,
        ManagerConfig::new(EntityType::new("Chat")).unique_on(["sql_data"]),
    );

    let first = manager.add(fields(json!({"sql_data": "123"}))).unwrap();
    let second = manager.add(fields(json!({"sql_data": "123"}))).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(h.sql.count("Chat").unwrap(), 1);
    assert_eq!(child_count(&h.remote, "chat"), 1);
}

#[test]
fn strict_unique_conflicts_with_no_writes() {
    let h = harness();
    let manager = manager_with(
        &h,
        ManagerConfig::new(EntityType::new("Chat"))
            .unique_on(["sql_data"])
            .strict_unique(),
    );

    manager.add(fields(json!({"sql_data": "123"}))).unwrap();
    let second = manager.add(fields(json!({"sql_data": "123"})));

    assert!(matches!(second, Err(ManagerError::Unique { .. })));
    assert_eq!(h.sql.count("Chat").unwrap(), 1);
    assert_eq!(child_count(&h.remote, "chat"), 1);
}

#[test]
fn multi_key_constraint_conflicts_only_on_full_match() {
    let h = harness();
    let manager = manager_with(
        &h,
        ManagerConfig::new(EntityType::new("Chat"))
            .unique_on(["sql_data", "extra"])
            .strict_unique(),
    );

    manager
        .add(fields(json!({"sql_data": "1", "extra": "one"})))
        .unwrap();
    manager
        .add(fields(json!({"sql_data": "1", "extra": "two"})))
        .unwrap();
    assert_eq!(h.sql.count("Chat").unwrap(), 2);

    let third = manager.add(fields(json!({"sql_data": "1", "extra": "one"})));
    assert!(matches!(third, Err(ManagerError::Unique { .. })));
    assert_eq!(h.sql.count("Chat").unwrap(), 2);
    assert_eq!(child_count(&h.remote, "chat"), 2);
}

#[test]
fn missing_constraint_field_fails_before_any_write() {
    let h = harness();
    let manager = manager_with(
        &h,
        ManagerConfig::new(EntityType::new("Chat")).unique_on(["sql_data"]),
    );

    let result = manager.add(fields(json!({"name": "no sql_data here"})));
    assert!(matches!(result, Err(ManagerError::Config(_))));
    assert_eq!(h.sql.count("Chat").unwrap(), 0);
    assert_eq!(child_count(&h.remote, "chat"), 0);
}

// ── Compensation ──────────────────────────────────────────────────

#[test]
fn relational_failure_removes_remote_orphan() {
    let remote = Arc::new(tether_remote::MemoryRemote::new());
    let adaptor = Arc::new(Adaptor::new(Arc::new(RejectingRelational), remote.clone()));
    let manager =
        AppendLogManager::new(adaptor, ManagerConfig::new(EntityType::new("Chat"))).unwrap();

    let result = manager.add(fields(json!({"name": "doomed"})));
    match result {
        Err(ManagerError::Sql { compensation, .. }) => assert!(compensation.is_none()),
        other => panic!("expected sql error, got {other:?}"),
    }
    // the subtree created in the same call no longer exists
    assert_eq!(remote.get("chat", None).unwrap(), None);
}

#[test]
fn failed_compensation_reports_both_failures() {
    let stuck = StuckRemote::new();
    let tree = stuck.inner.clone();
    let adaptor = Arc::new(Adaptor::new(Arc::new(RejectingRelational), Arc::new(stuck)));
    let manager =
        AppendLogManager::new(adaptor, ManagerConfig::new(EntityType::new("Chat"))).unwrap();

    let result = manager.add(fields(json!({"name": "doomed"})));
    match result {
        Err(ManagerError::Sql { compensation, .. }) => {
            assert!(compensation.is_some(), "secondary failure must surface");
        }
        other => panic!("expected sql error, got {other:?}"),
    }
    // the orphan is confirmed, not silently dropped
    assert_eq!(child_count(&tree, "chat"), 1);
}

// ── Cross-store invariant ─────────────────────────────────────────

#[test]
fn every_record_has_a_live_subtree() {
    let h = harness();
    let manager = manager_with(&h, ManagerConfig::new(EntityType::new("Chat")));

    let a = manager.add(fields(json!({"name": "a"}))).unwrap();
    let b = manager.add(fields(json!({"name": "b"}))).unwrap();

    for record in [&a, &b] {
        assert!(
            manager.get(record, None).unwrap().is_some(),
            "record {} has no subtree",
            record.id
        );
    }
    assert_eq!(h.sql.count("Chat").unwrap(), 2);
    assert_eq!(child_count(&h.remote, "chat"), 2);
}
