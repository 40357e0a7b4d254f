//! Core type definitions for Tether.
//!
//! This crate defines the fundamental, store-agnostic types shared by the
//! relational and remote store layers and by the write coordinator:
//! - Record and remote-key identifiers
//! - The linked entity record (one relational row paired with one remote subtree)
//! - Entity type declarations (name + default remote base path)
//! - Remote path composition helpers
//!
//! Everything here is pure data; no I/O, no store handles.

mod path;
mod record;

pub use path::{join_all, normalize_join};
pub use record::{EntityRecord, EntityType, RecordId, RemoteKey};
