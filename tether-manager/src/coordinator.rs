//! Shared coordinator core.
//!
//! Both manager variants delegate here: base-path resolution, the
//! entity-type guard, the two-phase build protocol with compensation, and
//! the shared get/path/delete operations. The variant types only select
//! the write strategy layered on top.

use crate::adaptor::Adaptor;
use crate::config::ManagerConfig;
use crate::error::{ManagerError, ManagerResult};
use crate::saga::{Undo, UndoLog};
use crate::validator::ValidatorSpec;
use serde_json::{Map, Value};
use std::sync::Arc;
use tether_types::{EntityRecord, EntityType, normalize_join};
use tracing::{debug, info, warn};

pub(crate) struct Coordinator {
    adaptor: Arc<Adaptor>,
    entity: EntityType,
    base_path: String,
    validator: Option<ValidatorSpec>,
    unique_on: Vec<String>,
    unique_silence: bool,
}

impl Coordinator {
    pub fn new(adaptor: Arc<Adaptor>, config: ManagerConfig) -> ManagerResult<Self> {
        let base_path = match &config.base_path {
            Some(path) => path.resolve(),
            None => config.entity.default_path().unwrap_or_default(),
        };
        if base_path.is_empty() {
            return Err(ManagerError::Config(format!(
                "no base path for entity type '{}': none configured and no default available",
                config.entity.name()
            )));
        }
        adaptor.bind(config.entity.name(), &base_path);
        Ok(Self {
            adaptor,
            entity: config.entity,
            base_path,
            validator: config.validator,
            unique_on: config.unique_on,
            unique_silence: config.unique_silence,
        })
    }

    pub fn adaptor(&self) -> &Adaptor {
        &self.adaptor
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    // ── Guards and paths ─────────────────────────────────────────

    /// Asserts that `record` belongs to this manager's entity type.
    /// Protects against cross-wired managers and unrelated record types.
    pub fn ensure_bound(&self, record: &EntityRecord) -> ManagerResult<()> {
        if record.entity_type == self.entity.name() {
            Ok(())
        } else {
            Err(ManagerError::TypeMismatch {
                expected: self.entity.name().to_string(),
                actual: record.entity_type.clone(),
            })
        }
    }

    /// Resolves the record's remote path relative to the store root.
    pub fn record_path(&self, record: &EntityRecord) -> ManagerResult<String> {
        self.ensure_bound(record)?;
        Ok(normalize_join(&self.base_path, record.remote_key.as_str()))
    }

    /// Resolves the record's remote path; `full` prefixes the store's
    /// root URL, for external consumers attaching live listeners.
    pub fn get_path(&self, record: &EntityRecord, full: bool) -> ManagerResult<String> {
        let relative = self.record_path(record)?;
        if full {
            Ok(normalize_join(self.adaptor.remote().root_url(), &relative))
        } else {
            Ok(relative)
        }
    }

    // ── Validation ───────────────────────────────────────────────

    pub fn validate_payload(&self, payload: &Map<String, Value>) -> ManagerResult<()> {
        match &self.validator {
            Some(spec) => spec.validate(payload),
            None => Ok(()),
        }
    }

    pub fn validate_entry(&self, key: &str, value: &Value) -> ManagerResult<()> {
        match &self.validator {
            Some(spec) => spec.validate_entry(key, value),
            None => Ok(()),
        }
    }

    // ── Build protocol ───────────────────────────────────────────

    /// Creates a linked record pair: uniqueness pre-check, remote write,
    /// relational write, compensating delete on relational failure.
    ///
    /// There is no compensation for a crash between the remote and
    /// relational writes; that residual window is accepted.
    pub fn build(
        &self,
        init_payload: Option<&Map<String, Value>>,
        fields: Map<String, Value>,
    ) -> ManagerResult<EntityRecord> {
        if let Some(payload) = init_payload {
            self.validate_payload(payload)?;
        }

        if !self.unique_on.is_empty() {
            let filter = self.unique_filter(&fields)?;
            if let Some(existing) = self
                .adaptor
                .relational()
                .find_match(self.entity.name(), &filter)?
            {
                if !self.unique_silence {
                    return Err(ManagerError::Unique {
                        entity_type: self.entity.name().to_string(),
                        fields: render_filter(&filter),
                    });
                }
                if init_payload.is_some() {
                    warn!(
                        "discarding payload for existing {} record {}: unique match on {}",
                        self.entity.name(),
                        existing.id,
                        render_filter(&filter)
                    );
                }
                debug!(
                    "returning existing {} record {} for {}",
                    self.entity.name(),
                    existing.id,
                    render_filter(&filter)
                );
                return Ok(existing);
            }
        }

        // Phase 1: remote write, reversible by key.
        let initial = match init_payload {
            Some(payload) => Value::Object(payload.clone()),
            None => Value::Bool(true),
        };
        let remote_key = self.adaptor.remote().post(&self.base_path, &initial)?;
        let mut undo = UndoLog::new();
        undo.push(Undo::RemoveSubtree {
            path: self.base_path.clone(),
            key: remote_key.clone(),
        });

        // Phase 2: relational write — the commit point.
        match self
            .adaptor
            .write_relational(&remote_key, self.entity.name(), &fields)
        {
            Ok(record) => {
                info!(
                    "created {} record {} at {}/{}",
                    self.entity.name(),
                    record.id,
                    self.base_path,
                    remote_key
                );
                Ok(record)
            }
            Err(source) => {
                let compensation = undo.unwind(self.adaptor.remote());
                Err(ManagerError::Sql {
                    source,
                    compensation,
                })
            }
        }
    }

    fn unique_filter(&self, fields: &Map<String, Value>) -> ManagerResult<Vec<(String, Value)>> {
        let mut filter = Vec::with_capacity(self.unique_on.len());
        for name in &self.unique_on {
            let value = fields.get(name).ok_or_else(|| {
                ManagerError::Config(format!(
                    "uniqueness field '{name}' missing from add() arguments"
                ))
            })?;
            filter.push((name.clone(), value.clone()));
        }
        Ok(filter)
    }

    // ── Shared operations ────────────────────────────────────────

    /// Reads the record's remote subtree, optionally descending into
    /// `subpath`. `None` means nothing exists there.
    pub fn get(&self, record: &EntityRecord, subpath: Option<&str>) -> ManagerResult<Option<Value>> {
        let path = self.record_path(record)?;
        Ok(self.adaptor.remote().get(&path, subpath)?)
    }

    /// Removes the pair: remote subtree first, then the relational row,
    /// then commit. A remote failure leaves the row intact rather than
    /// orphaning a live subtree with a deleted owner.
    pub fn delete(&self, record: &EntityRecord) -> ManagerResult<()> {
        self.ensure_bound(record)?;
        self.adaptor
            .remote()
            .delete(&self.base_path, Some(record.remote_key.as_str()))?;
        self.adaptor.relational().delete(record.id)?;
        self.adaptor.relational().commit()?;
        info!(
            "deleted {} record {} and subtree {}/{}",
            self.entity.name(),
            record.id,
            self.base_path,
            record.remote_key
        );
        Ok(())
    }
}

fn render_filter(filter: &[(String, Value)]) -> String {
    filter
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}
