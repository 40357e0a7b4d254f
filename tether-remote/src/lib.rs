//! Remote document store seam for Tether.
//!
//! The coordinator consumes the remote side through the narrow
//! [`RemoteStore`] trait: append-only `post` under a path (server assigns
//! the child key), subtree `get` with an absent sentinel, child `put`
//! overwrite, and subtree/child `delete`. Paths are plain `/`-delimited
//! strings; payloads are JSON values.
//!
//! Two implementations:
//! - [`RestRemote`] — blocking HTTP client against an RTDB-style REST
//!   surface (`<base>/<path>.json`)
//! - [`MemoryRemote`] — in-memory JSON tree with monotonic push keys,
//!   used by tests and embedded callers

mod error;
mod memory;
mod rest;
mod store;

pub use error::{RemoteError, RemoteResult};
pub use memory::MemoryRemote;
pub use rest::{RemoteConfig, RestRemote};
pub use store::RemoteStore;
