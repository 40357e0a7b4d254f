//! Relational store abstraction trait.
//!
//! The consumed capability set: typed record construction, session
//! add/delete/commit, and a filtered query returning the first match.

use crate::error::RelationalResult;
use serde_json::{Map, Value};
use tether_types::{EntityRecord, RecordId, RemoteKey};

/// Abstract relational session interface.
///
/// Writes are staged in an open transaction and become durable on
/// [`commit`](RelationalStore::commit). Implementations take `&self` and
/// serialize access internally; the caller is responsible for running one
/// logical unit of work (stage + commit) to completion at a time.
pub trait RelationalStore: Send {
    /// Stages a new record with the given remote key and fields, and
    /// returns it with its store-assigned [`RecordId`].
    fn insert(
        &self,
        entity_type: &str,
        remote_key: &RemoteKey,
        fields: &Map<String, Value>,
    ) -> RelationalResult<EntityRecord>;

    /// Returns the first record of `entity_type` whose fields equal every
    /// `(name, value)` pair in `filter` exactly, or `None`.
    fn find_match(
        &self,
        entity_type: &str,
        filter: &[(String, Value)],
    ) -> RelationalResult<Option<EntityRecord>>;

    /// Stages the deletion of a record by id.
    fn delete(&self, id: RecordId) -> RelationalResult<()>;

    /// Commits all staged writes.
    fn commit(&self) -> RelationalResult<()>;
}
