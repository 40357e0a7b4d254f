//! In-memory implementation of the remote document store.
//!
//! Holds the whole hierarchy as one JSON tree. Push keys are zero-padded
//! monotonic counters, so lexicographic key order equals insertion order —
//! the same ordering assumption the coordinator documents for real
//! servers. Empty subtrees are pruned on delete; a drained path reads as
//! absent, never as an empty object.

use crate::error::RemoteResult;
use crate::store::RemoteStore;
use serde_json::{Map, Value};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tether_types::{RemoteKey, normalize_join};

/// In-memory remote store backed by a single JSON tree.
pub struct MemoryRemote {
    root: Mutex<Value>,
    counter: AtomicU64,
    root_url: String,
}

impl MemoryRemote {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Mutex::new(Value::Object(Map::new())),
            counter: AtomicU64::new(0),
            root_url: "memory://tether".to_string(),
        }
    }

    /// Returns a deep snapshot of the whole tree (for assertions).
    #[must_use]
    pub fn snapshot(&self) -> Value {
        self.root.lock().unwrap().clone()
    }

    fn next_key(&self) -> RemoteKey {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        RemoteKey::new(format!("-m{n:012}"))
    }
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn get_node<'a>(node: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let mut current = node;
    for seg in segments {
        current = current.as_object()?.get(*seg)?;
    }
    if current.is_null() { None } else { Some(current) }
}

fn set_node(node: &mut Value, segments: &[&str], data: Value) {
    match segments.split_first() {
        None => *node = data,
        Some((head, rest)) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(map) = node {
                let child = map.entry(head.to_string()).or_insert(Value::Null);
                set_node(child, rest, data);
            }
        }
    }
}

/// Removes the node at `segments`, pruning ancestors emptied by the removal.
fn remove_node(node: &mut Value, segments: &[&str]) {
    let Some((head, rest)) = segments.split_first() else {
        *node = Value::Object(Map::new());
        return;
    };
    let Value::Object(map) = node else { return };
    if rest.is_empty() {
        map.remove(*head);
        return;
    }
    if let Some(child) = map.get_mut(*head) {
        remove_node(child, rest);
        let emptied = match map.get(*head) {
            Some(Value::Object(m)) => m.is_empty(),
            Some(Value::Null) => true,
            _ => false,
        };
        if emptied {
            map.remove(*head);
        }
    }
}

impl RemoteStore for MemoryRemote {
    fn root_url(&self) -> &str {
        &self.root_url
    }

    fn post(&self, path: &str, data: &Value) -> RemoteResult<RemoteKey> {
        let key = self.next_key();
        let target = normalize_join(path, key.as_str());
        let mut root = self.root.lock().unwrap();
        set_node(&mut root, &segments(&target), data.clone());
        Ok(key)
    }

    fn get(&self, path: &str, subpath: Option<&str>) -> RemoteResult<Option<Value>> {
        let full = match subpath {
            Some(sub) => normalize_join(path, sub),
            None => path.to_string(),
        };
        let root = self.root.lock().unwrap();
        Ok(get_node(&root, &segments(&full)).cloned())
    }

    fn put(&self, path: &str, name: &str, data: &Value) -> RemoteResult<()> {
        if data.is_null() {
            return self.delete(path, Some(name));
        }
        let target = normalize_join(path, name);
        let mut root = self.root.lock().unwrap();
        set_node(&mut root, &segments(&target), data.clone());
        Ok(())
    }

    fn delete(&self, path: &str, key: Option<&str>) -> RemoteResult<()> {
        let full = match key {
            Some(k) => normalize_join(path, k),
            None => path.to_string(),
        };
        let mut root = self.root.lock().unwrap();
        remove_node(&mut root, &segments(&full));
        Ok(())
    }
}
