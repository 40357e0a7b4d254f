//! Undo log for multi-store writes.
//!
//! Each reversible action performed during a build is recorded as an
//! inverse action. When a later phase fails, the log unwinds in reverse
//! order. Holds an ordered list rather than nested error handling so a
//! third phase can be added without restructuring the protocol.

use tether_remote::{RemoteError, RemoteStore};
use tether_types::RemoteKey;
use tracing::{error, warn};

/// The inverse of one committed reversible action.
pub(crate) enum Undo {
    /// Remove the subtree `key` under `path` (reverses a `post`).
    RemoveSubtree { path: String, key: RemoteKey },
}

/// Ordered log of inverse actions, unwound newest-first.
pub(crate) struct UndoLog {
    entries: Vec<Undo>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, undo: Undo) {
        self.entries.push(undo);
    }

    /// Unwinds every recorded action. A failed inverse leaves a confirmed
    /// orphan; it is logged distinctly and the first such failure is
    /// returned so the caller can attach it to the primary error.
    pub fn unwind(self, remote: &dyn RemoteStore) -> Option<RemoteError> {
        let mut failure = None;
        for undo in self.entries.into_iter().rev() {
            match undo {
                Undo::RemoveSubtree { path, key } => {
                    warn!("compensating delete of {}/{}", path, key);
                    if let Err(e) = remote.delete(&path, Some(key.as_str())) {
                        error!(
                            "compensating delete of {}/{} failed, orphan subtree remains: {}",
                            path, key, e
                        );
                        if failure.is_none() {
                            failure = Some(e);
                        }
                    }
                }
            }
        }
        failure
    }
}
