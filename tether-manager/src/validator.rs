//! Payload shape validation.
//!
//! A manager may carry a validator spec declared at construction: either a
//! set of required keys (presence only) or a mapping of key to expected
//! JSON value kind (presence and type). Single-key validation is a
//! typed-spec feature; a required-keys spec never checks individual
//! values.

use crate::error::{ManagerError, ManagerResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The JSON value kinds a typed spec can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the kind of a JSON value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns whether `value` is of this kind.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        Self::of(value) == *self
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        write!(f, "{name}")
    }
}

/// A declared payload shape, fixed once a manager is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidatorSpec {
    /// Every listed key must be present; values are ignored.
    RequiredKeys(Vec<String>),
    /// Every listed key must be present and of the declared kind.
    TypedKeys(Vec<(String, ValueKind)>),
}

impl ValidatorSpec {
    /// Shorthand for a required-keys spec.
    pub fn required<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RequiredKeys(keys.into_iter().map(Into::into).collect())
    }

    /// Shorthand for a typed-keys spec.
    pub fn typed<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ValueKind)>,
        S: Into<String>,
    {
        Self::TypedKeys(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Full-payload check: every declared key present (and, for a typed
    /// spec, of the declared kind).
    pub fn validate(&self, payload: &Map<String, Value>) -> ManagerResult<()> {
        let ok = match self {
            Self::RequiredKeys(keys) => keys.iter().all(|key| payload.contains_key(key)),
            Self::TypedKeys(entries) => entries
                .iter()
                .all(|(key, kind)| payload.get(key).is_some_and(|v| kind.matches(v))),
        };
        if ok {
            Ok(())
        } else {
            Err(ManagerError::Validation {
                payload: Value::Object(payload.clone()),
                spec: self.to_string(),
            })
        }
    }

    /// Single-key check of one value against the declared kind for `key`.
    ///
    /// Only a typed spec containing `key` performs a check; a required-keys
    /// spec or an undeclared key passes unconditionally.
    pub fn validate_entry(&self, key: &str, value: &Value) -> ManagerResult<()> {
        let Self::TypedKeys(entries) = self else {
            return Ok(());
        };
        let Some((_, kind)) = entries.iter().find(|(k, _)| k.as_str() == key) else {
            return Ok(());
        };
        if kind.matches(value) {
            Ok(())
        } else {
            Err(ManagerError::Validation {
                payload: value.clone(),
                spec: format!("{key}: {kind}"),
            })
        }
    }
}

impl fmt::Display for ValidatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequiredKeys(keys) => write!(f, "required keys [{}]", keys.join(", ")),
            Self::TypedKeys(entries) => {
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(k, kind)| format!("{k}: {kind}"))
                    .collect();
                write!(f, "typed keys {{{}}}", rendered.join(", "))
            }
        }
    }
}
