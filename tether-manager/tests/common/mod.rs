#![allow(dead_code)]

//! Shared test fixtures: a real store pair plus failure-injecting doubles.

use serde_json::{Map, Value};
use std::sync::Arc;
use tether_manager::Adaptor;
use tether_relational::{RelationalError, RelationalResult, RelationalStore, SqliteStore};
use tether_remote::{MemoryRemote, RemoteError, RemoteResult, RemoteStore};
use tether_types::{EntityRecord, RecordId, RemoteKey};

pub struct Harness {
    pub sql: Arc<SqliteStore>,
    pub remote: Arc<MemoryRemote>,
    pub adaptor: Arc<Adaptor>,
}

/// Adaptor over an in-memory SQLite store and an in-memory remote tree,
/// with the concrete handles kept for assertions.
pub fn harness() -> Harness {
    let sql = Arc::new(SqliteStore::open_in_memory().expect("in-memory sqlite"));
    let remote = Arc::new(MemoryRemote::new());
    let adaptor = Arc::new(Adaptor::new(sql.clone(), remote.clone()));
    Harness { sql, remote, adaptor }
}

pub fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object literal")
}

/// Number of children directly under `path` in the remote tree.
pub fn child_count(remote: &MemoryRemote, path: &str) -> usize {
    remote
        .get(path, None)
        .expect("memory get")
        .and_then(|v| v.as_object().map(|m| m.len()))
        .unwrap_or(0)
}

/// Relational session that rejects every write.
pub struct RejectingRelational;

impl RelationalStore for RejectingRelational {
    fn insert(
        &self,
        _entity_type: &str,
        _remote_key: &RemoteKey,
        _fields: &Map<String, Value>,
    ) -> RelationalResult<EntityRecord> {
        Err(RelationalError::InvalidData("insert rejected".to_string()))
    }

    fn find_match(
        &self,
        _entity_type: &str,
        _filter: &[(String, Value)],
    ) -> RelationalResult<Option<EntityRecord>> {
        Ok(None)
    }

    fn delete(&self, id: RecordId) -> RelationalResult<()> {
        Err(RelationalError::NotFound(id.to_string()))
    }

    fn commit(&self) -> RelationalResult<()> {
        Ok(())
    }
}

/// Remote store whose deletes always fail; everything else is backed by
/// the wrapped in-memory tree, which stays inspectable from outside.
pub struct StuckRemote {
    pub inner: Arc<MemoryRemote>,
}

impl StuckRemote {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryRemote::new()),
        }
    }
}

impl RemoteStore for StuckRemote {
    fn root_url(&self) -> &str {
        self.inner.root_url()
    }

    fn post(&self, path: &str, data: &Value) -> RemoteResult<RemoteKey> {
        self.inner.post(path, data)
    }

    fn get(&self, path: &str, subpath: Option<&str>) -> RemoteResult<Option<Value>> {
        self.inner.get(path, subpath)
    }

    fn put(&self, path: &str, name: &str, data: &Value) -> RemoteResult<()> {
        self.inner.put(path, name, data)
    }

    fn delete(&self, _path: &str, _key: Option<&str>) -> RemoteResult<()> {
        Err(RemoteError::Network("delete refused".to_string()))
    }
}
