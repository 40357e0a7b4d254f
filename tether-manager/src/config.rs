//! Manager construction surface.

use crate::validator::ValidatorSpec;
use tether_types::{EntityType, join_all};

/// A base-path override: a ready path string or an ordered list of
/// segments joined at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasePath {
    Single(String),
    Segments(Vec<String>),
}

impl BasePath {
    pub(crate) fn resolve(&self) -> String {
        match self {
            Self::Single(path) => path.clone(),
            Self::Segments(segments) => join_all(segments),
        }
    }
}

impl From<&str> for BasePath {
    fn from(path: &str) -> Self {
        Self::Single(path.to_string())
    }
}

impl From<String> for BasePath {
    fn from(path: String) -> Self {
        Self::Single(path)
    }
}

impl From<Vec<String>> for BasePath {
    fn from(segments: Vec<String>) -> Self {
        Self::Segments(segments)
    }
}

/// Configuration for a manager.
///
/// Defaults: no base-path override (the entity type's default path is
/// used), no validator, no uniqueness constraint, conflicts silenced
/// (`add` on an existing match returns the existing record instead of
/// failing).
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    pub entity: EntityType,
    pub base_path: Option<BasePath>,
    pub validator: Option<ValidatorSpec>,
    pub unique_on: Vec<String>,
    pub unique_silence: bool,
}

impl ManagerConfig {
    /// Creates a config for the given entity type with defaults.
    #[must_use]
    pub fn new(entity: EntityType) -> Self {
        Self {
            entity,
            base_path: None,
            validator: None,
            unique_on: Vec::new(),
            unique_silence: true,
        }
    }

    /// Overrides the remote base path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<BasePath>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Declares the payload validator spec.
    #[must_use]
    pub fn with_validator(mut self, spec: ValidatorSpec) -> Self {
        self.validator = Some(spec);
        self
    }

    /// Declares the uniqueness constraint field set. Every `add` call must
    /// then supply all of these fields.
    #[must_use]
    pub fn unique_on<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_on = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Makes uniqueness conflicts fail with an error instead of silently
    /// returning the existing record.
    #[must_use]
    pub fn strict_unique(mut self) -> Self {
        self.unique_silence = false;
        self
    }
}
