//! Mirrored-state manager: one relational row, one remote document.
//!
//! The remote document is the row's current state snapshot, overwritten
//! in place rather than appended to.

use crate::adaptor::Adaptor;
use crate::config::ManagerConfig;
use crate::coordinator::Coordinator;
use crate::error::{ManagerError, ManagerResult};
use serde_json::{Map, Value};
use std::sync::Arc;
use tether_types::EntityRecord;
use tracing::debug;

/// Manager for a one-row-to-one-remote-document relationship.
pub struct MirroredStateManager {
    core: Coordinator,
}

impl MirroredStateManager {
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

    /// Creates a linked record pair with `payload` as the initial remote
    /// document. The payload is validated before anything is written.
    pub fn add(
        &self,
        payload: &Map<String, Value>,
        fields: Map<String, Value>,
    ) -> ManagerResult<EntityRecord> {
        self.core.build(Some(payload), fields)
    }

    /// Overwrites remote state.
    ///
    /// With `entry`: single-key validation of `data` against that entry,
    /// then overwrite of exactly that one leaf, siblings untouched.
    /// Without: full-payload validation, then overwrite of the entire
    /// document — keys absent from `data` disappear (replace, not merge).
    pub fn set(
        &self,
        record: &EntityRecord,
        data: &Value,
        entry: Option<&str>,
    ) -> ManagerResult<()> {
        self.core.ensure_bound(record)?;
        match entry {
            Some(key) => {
                self.core.validate_entry(key, data)?;
                let path = self.core.record_path(record)?;
                self.core.adaptor().remote().put(&path, key, data)?;
                debug!("set {} at {}", key, path);
            }
            None => {
                let payload = data.as_object().ok_or_else(|| ManagerError::Validation {
                    payload: data.clone(),
                    spec: "object payload".to_string(),
                })?;
                self.core.validate_payload(payload)?;
                self.core.adaptor().remote().put(
                    self.core.base_path(),
                    record.remote_key.as_str(),
                    data,
                )?;
                debug!(
                    "replaced document {}/{}",
                    self.core.base_path(),
                    record.remote_key
                );
            }
        }
        Ok(())
    }

    /// Reads the record's document, optionally descending into `subpath`.
    pub fn get(&self, record: &EntityRecord, subpath: Option<&str>) -> ManagerResult<Option<Value>> {
        self.core.get(record, subpath)
    }

    /// Returns the record's remote path; `full` prefixes the store root
    /// URL for external consumers.
    pub fn get_path(&self, record: &EntityRecord, full: bool) -> ManagerResult<String> {
        self.core.get_path(record, full)
    }

    /// Removes the remote document, then the relational row, then commits.
    pub fn delete(&self, record: &EntityRecord) -> ManagerResult<()> {
        self.core.delete(record)
    }
}
