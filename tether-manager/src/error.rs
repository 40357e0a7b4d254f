//! Error types for the coordinator layer.

use serde_json::Value;
use tether_relational::RelationalError;
use tether_remote::RemoteError;
use thiserror::Error;

/// Result type for coordinator operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors that can occur in coordinator operations.
///
/// Validation and uniqueness failures are raised before any store is
/// mutated. [`ManagerError::Sql`] is raised only after the compensating
/// remote delete has been attempted.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// Manager misconfiguration: unresolvable base path, or a declared
    /// uniqueness field missing from an `add` call's arguments.
    #[error("configuration error: {0}")]
    Config(String),

    /// A payload failed a full or single-key shape check. Carries the
    /// offending payload and the spec it was checked against.
    #[error("payload failed validation: payload={payload}, spec={spec}")]
    Validation { payload: Value, spec: String },

    /// A uniqueness-constrained `add` found an existing conflicting row
    /// in strict mode. Nothing was written to either store.
    #[error("uniqueness conflict on {entity_type}: {fields}")]
    Unique { entity_type: String, fields: String },

    /// A record of another entity type was passed into this manager —
    /// cross-wired managers or unrelated record types.
    #[error("record of type '{actual}' passed to a manager bound to '{expected}'")]
    TypeMismatch { expected: String, actual: String },

    /// A relational store failure. When raised from the two-phase write,
    /// the compensating remote delete has already been attempted;
    /// `compensation` carries the secondary failure if that delete itself
    /// failed (a confirmed orphan subtree).
    #[error("relational store failure: {source}")]
    Sql {
        #[source]
        source: RelationalError,
        compensation: Option<RemoteError>,
    },

    /// A remote store failure, surfaced unchanged from any step.
    #[error("remote store failure: {0}")]
    Remote(#[from] RemoteError),
}

impl From<RelationalError> for ManagerError {
    fn from(source: RelationalError) -> Self {
        Self::Sql {
            source,
            compensation: None,
        }
    }
}
