//! Dual-store write coordinator for Tether.
//!
//! Creates linked pairs of records — one relational row, one remote
//! document subtree — and keeps them referentially consistent: uniqueness
//! pre-check, remote write, relational write, compensating delete when the
//! relational half fails.
//!
//! # Architecture
//!
//! - [`Adaptor`] — holds one relational session and one remote store
//!   client; exposes the transactional write-then-record primitive
//! - [`ValidatorSpec`] — payload shape checks (required keys or typed keys)
//! - [`AppendLogManager`] — one row, many remote children (event/message
//!   style)
//! - [`MirroredStateManager`] — one row, one remote document overwritten
//!   in place
//!
//! Both managers share one coordinator core; the variant only selects the
//! write strategy. A caller invokes a manager operation, the manager
//! validates and checks uniqueness, performs the remote write, then the
//! relational write, and returns the linked record or a typed error.

mod adaptor;
mod append;
mod config;
mod coordinator;
mod error;
mod mirror;
mod saga;
mod validator;

pub use adaptor::Adaptor;
pub use append::AppendLogManager;
pub use config::{BasePath, ManagerConfig};
pub use error::{ManagerError, ManagerResult};
pub use mirror::MirroredStateManager;
pub use validator::{ValidatorSpec, ValueKind};
