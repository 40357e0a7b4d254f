//! Linked record types.
//!
//! An [`EntityRecord`] is one relational row paired with one remote
//! subtree. The pairing is carried by the [`RemoteKey`]: the server-assigned
//! leaf segment under the entity type's remote base path.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Local identifier of a relational row, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wraps a store-assigned row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying row id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Server-assigned leaf identifier of an entity's remote subtree.
///
/// Unique under its base path; assigned by the remote store on `post` and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteKey(String);

impl RemoteKey {
    /// Wraps a server-assigned key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a path segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RemoteKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A declared entity type: a name plus an optional declared remote base path.
///
/// When no path is declared, the default base path is the lower-cased type
/// name. Managers resolve their base path against this declaration when no
/// explicit override is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    name: String,
    declared_path: Option<String>,
}

impl EntityType {
    /// Declares an entity type whose default base path is its lower-cased name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_path: None,
        }
    }

    /// Declares an entity type with an explicit default base path.
    #[must_use]
    pub fn with_path(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_path: Some(path.into()),
        }
    }

    /// Returns the declared type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the default base path: the declared path if present,
    /// otherwise the lower-cased type name. `None` when neither resolves
    /// to a non-empty path.
    #[must_use]
    pub fn default_path(&self) -> Option<String> {
        match &self.declared_path {
            Some(p) if !p.is_empty() => Some(p.clone()),
            Some(_) => None,
            None if self.name.is_empty() => None,
            None => Some(self.name.to_lowercase()),
        }
    }
}

/// One relational row paired one-to-one with a remote subtree.
///
/// Records are only materialized after the remote write returns a key, so
/// `remote_key` is always populated. `fields` holds the arbitrary
/// application fields as a flat JSON object; `created_at` is a unix-millis
/// stamp assigned by the relational store at insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub id: RecordId,
    pub entity_type: String,
    pub remote_key: RemoteKey,
    pub fields: Map<String, Value>,
    pub created_at: i64,
}

impl EntityRecord {
    /// Extracts a string field by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }

    /// Extracts a boolean field by name.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(|v| v.as_bool())
    }

    /// Extracts a numeric field by name.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(|v| v.as_f64())
    }
}
