//! Remote document store abstraction trait.
//!
//! Defines the capability set the coordinator consumes from a hierarchical
//! document store.

use crate::error::RemoteResult;
use serde_json::Value;
use tether_types::RemoteKey;

/// Abstract remote document store interface.
///
/// Paths are `/`-delimited strings relative to the store root. Absent
/// nodes read as `None`.
pub trait RemoteStore: Send + Sync {
    /// Returns the store's root URL, used to render full paths for
    /// external consumers (e.g. clients attaching live listeners).
    fn root_url(&self) -> &str;

    /// Appends `data` as a new child under `path` and returns the
    /// server-assigned child key.
    ///
    /// Append-only: existing siblings are never touched, so concurrent
    /// posts to one path never collide. Relative ordering of sibling keys
    /// follows the server's key assignment — an assumption on the store,
    /// not a contract enforced here.
    fn post(&self, path: &str, data: &Value) -> RemoteResult<RemoteKey>;

    /// Reads the subtree at `path`, optionally descending into `subpath`.
    /// Returns `None` if nothing exists there.
    fn get(&self, path: &str, subpath: Option<&str>) -> RemoteResult<Option<Value>>;

    /// Overwrites exactly the child `name` under `path` with `data`,
    /// leaving siblings untouched.
    fn put(&self, path: &str, name: &str, data: &Value) -> RemoteResult<()>;

    /// Removes the child `key` under `path`, or the whole subtree at
    /// `path` when `key` is `None`.
    fn delete(&self, path: &str, key: Option<&str>) -> RemoteResult<()>;
}
