//! Store handle pairing.
//!
//! An [`Adaptor`] holds one relational session and one remote store
//! client. Managers for different entity types share one adaptor; each
//! registers its resolved base path into the adaptor's bindings map at
//! construction. The bindings map is a diagnostic registry only — it is
//! never consulted for routing.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tether_relational::{RelationalResult, RelationalStore};
use tether_remote::RemoteStore;
use tether_types::{EntityRecord, RemoteKey};
use tracing::debug;

/// One relational session paired with one remote store client.
pub struct Adaptor {
    relational: Arc<dyn RelationalStore>,
    remote: Arc<dyn RemoteStore>,
    bindings: Mutex<HashMap<String, String>>,
}

impl Adaptor {
    /// Creates an adaptor over the given store handles.
    pub fn new(relational: Arc<dyn RelationalStore>, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            relational,
            remote,
            bindings: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the relational session.
    pub fn relational(&self) -> &dyn RelationalStore {
        self.relational.as_ref()
    }

    /// Returns the remote store client.
    pub fn remote(&self) -> &dyn RemoteStore {
        self.remote.as_ref()
    }

    /// Records an entity-type → base-path binding for diagnostics.
    pub(crate) fn bind(&self, entity_type: &str, base_path: &str) {
        debug!("binding {} -> {}", entity_type.to_lowercase(), base_path);
        self.bindings
            .lock()
            .unwrap()
            .insert(entity_type.to_lowercase(), base_path.to_string());
    }

    /// Returns a snapshot of the registered bindings
    /// (lower-cased entity-type name → resolved base path).
    pub fn bindings(&self) -> HashMap<String, String> {
        self.bindings.lock().unwrap().clone()
    }

    /// The second half of the two-phase write: inserts a record carrying
    /// an already-written remote key, commits, and returns it.
    pub fn write_relational(
        &self,
        remote_key: &RemoteKey,
        entity_type: &str,
        fields: &Map<String, Value>,
    ) -> RelationalResult<EntityRecord> {
        let record = self.relational.insert(entity_type, remote_key, fields)?;
        self.relational.commit()?;
        Ok(record)
    }
}
