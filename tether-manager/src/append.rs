//! Append-log manager: one relational row, many remote children.
//!
//! Models event/message-style data — one conversation row, many message
//! documents. `push` appends; prior children are never touched.

use crate::adaptor::Adaptor;
use crate::config::ManagerConfig;
use crate::coordinator::Coordinator;
use crate::error::ManagerResult;
use serde_json::{Map, Value};
use std::sync::Arc;
use tether_types::EntityRecord;
use tracing::debug;

/// Manager for a one-row-to-many-remote-children relationship.
pub struct AppendLogManager {
    core: Coordinator,
}

impl AppendLogManager {
    /// Builds the manager and registers its base path with the adaptor.
    pub fn new(adaptor: Arc<Adaptor>, config: ManagerConfig) -> ManagerResult<Self> {
        Ok(Self {
            core: Coordinator::new(adaptor, config)?,
        })
    }

    /// Returns the resolved remote base path.
    pub fn base_path(&self) -> &str {
        self.core.base_path()
    }

    /// Creates a linked record pair. The remote side starts as a `true`
    /// placeholder until the first `push` lands. With a uniqueness
    /// constraint declared, a matching existing record is returned
    /// unchanged (silent mode) or rejected (strict mode).
    pub fn add(&self, fields: Map<String, Value>) -> ManagerResult<EntityRecord> {
        self.core.build(None, fields)
    }

    /// Validates `payload` against the full spec and appends it as a new
    /// child under the record's subtree. Each call creates a distinct
    /// child; siblings are never overwritten.
    pub fn push(&self, record: &EntityRecord, payload: &Map<String, Value>) -> ManagerResult<()> {
        let path = self.core.record_path(record)?;
        self.core.validate_payload(payload)?;
        let key = self
            .core
            .adaptor()
            .remote()
            .post(&path, &Value::Object(payload.clone()))?;
        debug!("pushed child {} under {}", key, path);
        Ok(())
    }

    /// Reads the record's subtree, optionally descending into `subpath`.
    pub fn get(&self, record: &EntityRecord, subpath: Option<&str>) -> ManagerResult<Option<Value>> {
        self.core.get(record, subpath)
    }

    /// Returns the record's remote path; `full` prefixes the store root
    /// URL for external consumers.
    pub fn get_path(&self, record: &EntityRecord, full: bool) -> ManagerResult<String> {
        self.core.get_path(record, full)
    }

    /// Removes the remote subtree, then the relational row, then commits.
    pub fn delete(&self, record: &EntityRecord) -> ManagerResult<()> {
        self.core.delete(record)
    }
}
