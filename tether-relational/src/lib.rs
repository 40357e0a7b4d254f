//! Relational store seam for Tether.
//!
//! The coordinator consumes the relational side through the narrow
//! [`RelationalStore`] trait: typed record insertion, filtered first-match
//! queries, row deletion, and explicit commit. [`SqliteStore`] is the
//! bundled SQLite implementation.
//!
//! # Session model
//!
//! A store handle is one session. Writes are staged inside an open
//! transaction and land on `commit`; one logical unit of work must run to
//! completion before the next begins on the same handle. Concurrent
//! callers should each hold their own store.

mod error;
mod sqlite;
mod store;

pub use error::{RelationalError, RelationalResult};
pub use sqlite::SqliteStore;
pub use store::RelationalStore;
